//! 进程级容器的发布与并发读取
//!
//! 全局状态在同一个测试二进制内共享，所以整个生命周期放在一个测试中验证。


use common::*;
use ioc_common::{same_object, BeanDefinition, BootstrapError, ContainerDefinition};
use ioc_composition::{global, ContainerBuilder};
use std::thread;

fn bank_builder() -> ContainerBuilder {
    ContainerBuilder::new()
        .with_config_loader(
            ContainerDefinition::new()
                .with_bean(BeanDefinition::new("accountDao", ACCOUNT_DAO_CLASS))
                .with_bean(
                    BeanDefinition::new("transferService", TRANSFER_SERVICE_CLASS)
                        .with_property("AccountDao", "accountDao"),
                ),
        )
        .with_catalog(bank_catalog())
}

#[test]
fn global_container_lifecycle() {
    assert!(!global::is_initialized());
    assert!(global::lookup("accountDao").is_none());

    // 启动失败不会发布容器
    let failed = global::initialize(ContainerBuilder::new().with_catalog(bank_catalog()));
    assert!(matches!(failed, Err(BootstrapError::Config { .. })));
    assert!(!global::is_initialized());

    let report = global::initialize(bank_builder()).unwrap();
    assert!(report.errors.is_empty());
    assert!(global::is_initialized());

    let again = global::initialize(bank_builder());
    assert!(matches!(again, Err(BootstrapError::AlreadyInitialized)));

    let first = global::get::<dyn TransferService>("transferService").unwrap();
    let readers: Vec<_> = (0..8)
        .map(|_| {
            let first = first.clone();
            thread::spawn(move || {
                let service = global::get::<dyn TransferService>("transferService").unwrap();
                assert!(same_object(&service, &first));
                global::container().unwrap().len()
            })
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), 2);
    }

    first.transfer("6029621011000", "6029621011001", 80).unwrap();
    let dao = global::get::<dyn AccountDao>("accountDao").unwrap();
    assert_eq!(dao.balance("6029621011000"), Some(9_920));
    assert_eq!(dao.balance("6029621011001"), Some(10_080));
}

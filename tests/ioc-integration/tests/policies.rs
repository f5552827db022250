//! 启动策略与失败收集


use common::*;
use ioc_abstractions::{ClassScanner, ProxyFactory, PROXY_FACTORY_ID};
use ioc_common::{
    Bean, BeanDefinition, BootstrapError, BootstrapPhase, BootstrapPolicy, ContainerDefinition,
    InstantiationError, Marker, MissingRefPolicy, ProxyError, ReflectionAccessError, ScanError,
    TypeCatalog, TypeDescriptor,
};
use ioc_composition::{Bootstrapped, ContainerBuilder};
use ioc_impl::{BootstrapStatus, TRANSACTION_PROXY_FACTORY_CLASS};
use parking_lot::Mutex;
use std::sync::Arc;

const RECORDING_FACTORY_CLASS: &str = "bank::tx::RecordingProxyFactory";

/// 记录被包装组件的代理工厂
#[derive(Default)]
struct RecordingProxyFactory {
    wrapped: Mutex<Vec<&'static str>>,
}

impl ProxyFactory for RecordingProxyFactory {
    fn wrap(&self, target: &Bean) -> Result<Bean, ProxyError> {
        self.wrapped.lock().push(target.type_name());
        target
            .decorate(Arc::new(RecordingBoundary::default()))
            .ok_or_else(|| ProxyError::Unsupported {
                type_name: target.type_name().to_string(),
            })
    }
}

fn catalog_with_recording_factory() -> Arc<TypeCatalog> {
    let catalog = bank_catalog();
    catalog.register(
        TypeDescriptor::builder::<RecordingProxyFactory>()
            .named(RECORDING_FACTORY_CLASS)
            .default_constructor()
            .exposes::<dyn ProxyFactory>(|this| this)
            .build(),
    );
    catalog
}

/// 组件扫描正常、事务扫描失败的扫描器
struct HalfBrokenScanner {
    catalog: Arc<TypeCatalog>,
}

impl ClassScanner for HalfBrokenScanner {
    fn scan(&self, package_path: &str, marker: Marker) -> Result<Vec<Arc<TypeDescriptor>>, ScanError> {
        match marker {
            Marker::Component => Ok(self.catalog.get(ORDER_SERVICE_CLASS).into_iter().collect()),
            Marker::Transactional => Err(ScanError::scan_failed(format!(
                "index unavailable for {}",
                package_path
            ))),
        }
    }
}

fn bank_with_dangling_reference() -> ContainerDefinition {
    ContainerDefinition::new()
        .with_bean(BeanDefinition::new("accountDao", ACCOUNT_DAO_CLASS))
        .with_bean(
            BeanDefinition::new("transferService", TRANSFER_SERVICE_CLASS)
                .with_property("AccountDao", "nowhere"),
        )
}

fn run(definition: ContainerDefinition) -> Result<Bootstrapped, BootstrapError> {
    ContainerBuilder::new()
        .with_config_loader(definition)
        .with_catalog(bank_catalog())
        .bootstrap()
}

#[test]
fn partial_policy_collects_every_failure() {
    let definition = ContainerDefinition::new()
        .with_bean(BeanDefinition::new("brokenDao", BROKEN_CLASS))
        .with_bean(BeanDefinition::new("ghost", "bank::dao::GhostDao"))
        .with_bean(BeanDefinition::new("accountDao", ACCOUNT_DAO_CLASS));

    let Bootstrapped { container, report } = run(definition).unwrap();

    assert_eq!(report.status(), BootstrapStatus::Partial);
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(
        &report.errors[0],
        BootstrapError::Instantiation {
            bean_id,
            phase: BootstrapPhase::Instantiation,
            source: InstantiationError::ConstructorFailed { .. },
        } if bean_id == "brokenDao"
    ));
    assert!(matches!(
        &report.errors[1],
        BootstrapError::ClassResolution { bean_id, source } if bean_id == "ghost"
            && source.class_name == "bank::dao::GhostDao"
    ));

    assert_eq!(container.ids().collect::<Vec<_>>(), vec!["accountDao"]);
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let result = ContainerBuilder::new()
        .with_config_loader(
            ContainerDefinition::new()
                .with_bean(BeanDefinition::new("brokenDao", BROKEN_CLASS))
                .with_bean(BeanDefinition::new("ghost", "bank::dao::GhostDao")),
        )
        .with_catalog(bank_catalog())
        .with_policy(BootstrapPolicy::FailFast)
        .bootstrap();

    let err = result.unwrap_err();
    assert_eq!(err.bean_id(), Some("brokenDao"));
    assert_eq!(err.phase(), BootstrapPhase::Instantiation);
}

#[test]
fn missing_reference_injects_absent_by_default() {
    let Bootstrapped { container, report } = run(bank_with_dangling_reference()).unwrap();

    assert_eq!(report.status(), BootstrapStatus::Success);
    let service = container
        .get_concrete::<TransferServiceImpl>("transferService")
        .unwrap();
    assert!(!service.account_dao.is_present());
    assert_eq!(
        service.transfer("6029621011000", "6029621011001", 1),
        Err(TransferError::NotWired("accountDao"))
    );
}

#[test]
fn missing_reference_skip_leaves_bean_untouched() {
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_config_loader(bank_with_dangling_reference())
        .with_catalog(bank_catalog())
        .with_missing_ref_policy(MissingRefPolicy::Skip)
        .bootstrap()
        .unwrap();

    assert!(report.errors.is_empty());
    assert!(container.contains("transferService"));
}

#[test]
fn missing_reference_fail_is_reported() {
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_config_loader(bank_with_dangling_reference())
        .with_catalog(bank_catalog())
        .with_missing_ref_policy(MissingRefPolicy::Fail)
        .bootstrap()
        .unwrap();

    assert_eq!(report.status(), BootstrapStatus::Partial);
    assert!(matches!(
        &report.errors[..],
        [BootstrapError::ReflectionAccess {
            phase: BootstrapPhase::PropertyWiring,
            source: ReflectionAccessError::MissingReference { reference, .. },
            ..
        }] if reference == "nowhere"
    ));
    // 实例已注册，只是依赖没有装配
    assert!(container.contains("transferService"));
}

#[test]
fn missing_reference_fail_applies_to_scanned_fields() {
    let Bootstrapped { report, .. } = ContainerBuilder::new()
        .with_config_loader(ContainerDefinition::new().with_scan_root("bank::service::audit"))
        .with_catalog(bank_catalog())
        .with_missing_ref_policy(MissingRefPolicy::Fail)
        .bootstrap()
        .unwrap();

    assert!(matches!(
        &report.errors[..],
        [BootstrapError::ReflectionAccess {
            bean_id,
            phase: BootstrapPhase::FieldInjection,
            ..
        }] if bean_id == "auditLog"
    ));
}

#[test]
fn transactional_without_factory_keeps_raw_component() {
    let Bootstrapped { container, report } =
        run(ContainerDefinition::new().with_scan_root("bank::service")).unwrap();

    assert_eq!(report.status(), BootstrapStatus::Partial);
    assert!(report.errors.iter().any(|err| matches!(
        err,
        BootstrapError::Proxy {
            source: ProxyError::FactoryMissing { .. },
            ..
        }
    )));
    let order_service = container.lookup("orderService").unwrap();
    assert!(!order_service.is_decorated());
    assert!(order_service.downcast::<OrderService>().is_some());
}

#[test]
fn unconfigured_factory_is_reported() {
    let definition = ContainerDefinition::new()
        .with_bean(BeanDefinition::new(PROXY_FACTORY_ID, TRANSACTION_PROXY_FACTORY_CLASS))
        .with_scan_root("bank::service");
    let Bootstrapped { container, report } = run(definition).unwrap();

    assert!(report.errors.iter().any(|err| matches!(
        err,
        BootstrapError::Proxy {
            source: ProxyError::NotConfigured,
            bean_id,
        } if bean_id == "orderService"
    )));
    assert!(!container.lookup("orderService").unwrap().is_decorated());
}

#[test]
fn custom_proxy_factory_is_used_for_decoration() {
    let definition = ContainerDefinition::new()
        .with_bean(BeanDefinition::new(PROXY_FACTORY_ID, RECORDING_FACTORY_CLASS))
        .with_bean(BeanDefinition::new("transferService", TRANSFER_SERVICE_CLASS))
        .with_scan_root("bank::service");
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_config_loader(definition)
        .with_catalog(catalog_with_recording_factory())
        .bootstrap()
        .unwrap();

    assert_eq!(report.decorated_beans, 1);
    let factory = container
        .get_concrete::<RecordingProxyFactory>(PROXY_FACTORY_ID)
        .unwrap();
    let wrapped = factory.wrapped.lock().clone();
    assert_eq!(wrapped.len(), 1);
    assert!(wrapped[0].ends_with("OrderService"));
    assert!(container.lookup("orderService").unwrap().is_decorated());
}

#[test]
fn scanner_failure_skips_only_that_marker() {
    let catalog = bank_catalog();
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_config_loader(ContainerDefinition::new().with_scan_root("bank"))
        .with_catalog(catalog.clone())
        .with_class_scanner(Arc::new(HalfBrokenScanner { catalog }))
        .bootstrap()
        .unwrap();

    assert_eq!(report.scanned_components, 1);
    assert_eq!(report.decorated_beans, 0);
    assert!(matches!(
        &report.errors[..],
        [BootstrapError::Scan {
            root,
            source: ScanError::ScanFailed { .. },
        }] if root == "bank"
    ));
    assert!(!container.lookup("orderService").unwrap().is_decorated());
}

#[test]
fn fail_fast_aborts_on_scan_failure() {
    let catalog = bank_catalog();
    let result = ContainerBuilder::new()
        .with_config_loader(ContainerDefinition::new().with_scan_root("bank"))
        .with_catalog(catalog.clone())
        .with_class_scanner(Arc::new(HalfBrokenScanner { catalog }))
        .with_policy(BootstrapPolicy::FailFast)
        .bootstrap();

    assert!(matches!(result, Err(BootstrapError::Scan { .. })));
}

//! `#[derive(Bean)]` 与容器的集成测试

use bean_macros::Bean;
use ioc_common::{BeanType, BoxError, InstantiationError, Marker, TypeCatalog};

mod greeting {
    use bean_macros::Bean;
    use ioc_common::{in_transaction, Injected, TransactionBoundary, TransactionError, Transactional};
    use std::sync::Arc;

    pub trait Punctuation: Send + Sync {
        fn mark(&self) -> &'static str;
    }

    pub trait Greeter: Send + Sync {
        fn greet(&self, name: &str) -> Result<String, TransactionError>;
    }

    #[derive(Bean, Default)]
    #[bean(component = "punctuation", exposes = dyn Punctuation)]
    pub struct Exclamation;

    impl Punctuation for Exclamation {
        fn mark(&self) -> &'static str {
            "!"
        }
    }

    #[derive(Bean, Default)]
    #[bean(component, transactional, exposes = dyn Greeter)]
    pub struct PoliteGreeter {
        #[inject]
        #[property]
        pub punctuation: Injected<dyn Punctuation>,
    }

    impl Greeter for PoliteGreeter {
        fn greet(&self, name: &str) -> Result<String, TransactionError> {
            let mark = self.punctuation.get().map_or(".", |p| p.mark());
            Ok(format!("Hello, {}{}", name, mark))
        }
    }

    struct TransactionalGreeter {
        target: Arc<dyn Greeter>,
        boundary: Arc<dyn TransactionBoundary>,
    }

    impl Greeter for TransactionalGreeter {
        fn greet(&self, name: &str) -> Result<String, TransactionError> {
            in_transaction(self.boundary.as_ref(), || self.target.greet(name))
        }
    }

    impl Transactional for dyn Greeter {
        fn decorate(target: Arc<Self>, boundary: Arc<dyn TransactionBoundary>) -> Arc<Self> {
            Arc::new(TransactionalGreeter { target, boundary })
        }
    }
}

mod tx {
    use bean_macros::Bean;
    use ioc_common::{TransactionBoundary, TransactionError};
    use parking_lot::Mutex;

    #[derive(Bean, Default)]
    #[bean(name = "fixtures::RecordingManager", exposes = dyn TransactionBoundary)]
    pub struct RecordingManager {
        journal: Mutex<Vec<&'static str>>,
    }

    impl RecordingManager {
        pub fn journal(&self) -> Vec<&'static str> {
            self.journal.lock().clone()
        }
    }

    impl TransactionBoundary for RecordingManager {
        fn begin(&self) -> Result<(), TransactionError> {
            self.journal.lock().push("begin");
            Ok(())
        }

        fn commit(&self) -> Result<(), TransactionError> {
            self.journal.lock().push("commit");
            Ok(())
        }

        fn rollback(&self) -> Result<(), TransactionError> {
            self.journal.lock().push("rollback");
            Ok(())
        }
    }
}

fn refuse() -> Result<Unbuildable, BoxError> {
    Err("pool exhausted".into())
}

#[derive(Bean)]
#[bean(name = "fixtures::Unbuildable", constructor = refuse)]
pub struct Unbuildable;

#[derive(Bean)]
#[bean(component, no_default)]
pub struct NoDefault {
    pub seed: u64,
}

#[test]
fn descriptor_reflects_attributes() {
    let descriptor = greeting::PoliteGreeter::descriptor();

    assert_eq!(descriptor.name(), "derive_tests::greeting::PoliteGreeter");
    assert_eq!(descriptor.module_path(), "derive_tests::greeting");
    assert_eq!(descriptor.component_id(), "politeGreeter");
    assert!(descriptor.has_marker(Marker::Component));
    assert!(descriptor.is_transactional());

    let injections = descriptor.injections();
    assert_eq!(injections.len(), 1);
    assert_eq!(injections[0].field(), "punctuation");
    assert_eq!(injections[0].dependency_id(), "punctuation");

    let setter = descriptor.find_setter("Punctuation").unwrap();
    assert_eq!(setter.name(), "set_punctuation");
}

#[test]
fn explicit_component_id_is_kept() {
    let descriptor = greeting::Exclamation::descriptor();
    assert_eq!(descriptor.component_id(), "punctuation");
    assert_eq!(descriptor.convention_id(), "exclamation");
    assert!(!descriptor.is_transactional());
}

#[test]
fn derived_types_are_registered_globally() {
    let catalog = TypeCatalog::global();
    assert!(catalog.contains("derive_tests::greeting::PoliteGreeter"));
    assert!(catalog.contains("derive_tests.greeting.Exclamation"));
    assert!(catalog.contains("fixtures::RecordingManager"));
    assert!(catalog.contains("fixtures::Unbuildable"));
}

#[test]
fn constructor_failures_surface_as_instantiation_errors() {
    match Unbuildable::descriptor().instantiate() {
        Err(InstantiationError::ConstructorFailed { source, .. }) => {
            assert_eq!(source.to_string(), "pool exhausted");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(bean) => panic!("unexpected bean: {}", bean.type_name()),
    }

    let descriptor = NoDefault::descriptor();
    assert!(!descriptor.has_default_constructor());
    assert!(matches!(
        descriptor.instantiate(),
        Err(InstantiationError::NoDefaultConstructor { .. })
    ));
}

mod end_to_end {
    use super::greeting::{Greeter, PoliteGreeter};
    use super::tx::RecordingManager;
    use ioc_abstractions::PROXY_FACTORY_ID;
    use ioc_common::{BeanDefinition, ContainerDefinition};
    use ioc_composition::{Bootstrapped, ContainerBuilder};
    use ioc_impl::{BootstrapStatus, TRANSACTION_PROXY_FACTORY_CLASS};

    #[test]
    fn derived_components_are_scanned_wired_and_decorated() {
        let definition = ContainerDefinition::new()
            .with_bean(BeanDefinition::new("transactionManager", "fixtures::RecordingManager"))
            .with_bean(
                BeanDefinition::new(PROXY_FACTORY_ID, TRANSACTION_PROXY_FACTORY_CLASS)
                    .with_property("TransactionManager", "transactionManager"),
            )
            .with_scan_root("derive_tests::greeting");

        let Bootstrapped { container, report } = ContainerBuilder::new()
            .with_config_loader(definition)
            .bootstrap()
            .unwrap();

        assert_eq!(report.status(), BootstrapStatus::Success);
        assert_eq!(report.scanned_components, 2);
        assert_eq!(report.decorated_beans, 1);

        let raw = container.lookup("politeGreeter").unwrap();
        assert!(raw.is_decorated());
        assert!(raw.downcast::<PoliteGreeter>().is_none());

        let greeter = container.get::<dyn Greeter>("politeGreeter").unwrap();
        assert_eq!(greeter.greet("Ada").unwrap(), "Hello, Ada!");

        let manager = container
            .get_concrete::<RecordingManager>("transactionManager")
            .unwrap();
        assert_eq!(manager.journal(), vec!["begin", "commit"]);
    }
}

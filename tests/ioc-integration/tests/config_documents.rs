//! 从配置文档启动容器


use common::*;
use ioc_common::{same_object, BootstrapError, ConfigError, MissingRefPolicy};
use ioc_composition::{Bootstrapped, ContainerBuilder};
use ioc_config::{DocumentConfigLoader, DocumentFormat};
use ioc_impl::BootstrapStatus;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

const BANK_TOML: &str = r#"
[[bean]]
id = "accountDao"
class = "bank::dao::JdbcAccountDao"

[[bean]]
id = "transferService"
class = "bank::service::TransferServiceImpl"

  [[bean.property]]
  name = "AccountDao"
  ref = "accountDao"

[[bean]]
id = "transactionManager"
class = "bank::tx::RecordingBoundary"

[[bean]]
id = "proxyFactory"
class = "ioc_impl::proxy::TransactionProxyFactory"

  [[bean.property]]
  name = "TransactionManager"
  ref = "transactionManager"

[[scan]]
package = "bank.service"
"#;

const BANK_JSON: &str = r#"{
  "container": { "missing_ref": "fail" },
  "beans": [
    { "id": "accountDao", "class": "bank.dao.JdbcAccountDao" },
    {
      "id": "transferService",
      "class": "bank.service.TransferServiceImpl",
      "properties": [{ "name": "AccountDao", "ref": "accountDao" }]
    }
  ]
}"#;

const BANK_YAML: &str = r#"
container:
  policy: fail_fast
bean:
  - id: accountDao
    class: bank::dao::JdbcAccountDao
  - id: brokenDao
    class: bank::dao::BrokenDao
"#;

fn document_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn toml_document_drives_both_passes() -> anyhow::Result<()> {
    let file = document_file(".toml", BANK_TOML);
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_document(file.path())
        .with_catalog(bank_catalog())
        .bootstrap()?;

    assert_eq!(report.status(), BootstrapStatus::Success);
    assert_eq!(report.explicit_beans, 4);
    assert_eq!(report.decorated_beans, 1);

    let service = container
        .get_concrete::<TransferServiceImpl>("transferService")
        .unwrap();
    let dao = container.get::<dyn AccountDao>("accountDao").unwrap();
    assert!(same_object(&service.account_dao.get().unwrap(), &dao));
    assert!(container.lookup("orderService").unwrap().is_decorated());
    Ok(())
}

#[test]
fn json_document_settings_are_applied() -> anyhow::Result<()> {
    let file = document_file(".json", BANK_JSON);
    let loader = DocumentConfigLoader::from_path(file.path());
    let Bootstrapped { container, report } = ContainerBuilder::new()
        .with_config_loader(loader)
        .with_catalog(bank_catalog())
        .bootstrap()?;

    assert!(report.errors.is_empty());
    assert_eq!(
        container.ids().collect::<Vec<_>>(),
        vec!["accountDao", "transferService"]
    );
    Ok(())
}

#[test]
fn yaml_fail_fast_setting_aborts_bootstrap() {
    let file = document_file(".yaml", BANK_YAML);
    let result = ContainerBuilder::new()
        .with_document(file.path())
        .with_catalog(bank_catalog())
        .bootstrap();

    assert!(matches!(
        result,
        Err(BootstrapError::Instantiation { ref bean_id, .. }) if bean_id == "brokenDao"
    ));
}

#[test]
fn builder_settings_override_document() {
    let file = document_file(".json", &BANK_JSON.replace(r#""ref": "accountDao""#, r#""ref": "ghostDao""#));
    let Bootstrapped { report, .. } = ContainerBuilder::new()
        .with_document(file.path())
        .with_catalog(bank_catalog())
        .with_missing_ref_policy(MissingRefPolicy::InjectAbsent)
        .bootstrap()
        .unwrap();

    assert_eq!(report.status(), BootstrapStatus::Success);
}

#[test]
fn inline_document_without_beans_or_scans_is_rejected() {
    let result = ContainerBuilder::new()
        .with_config_loader(DocumentConfigLoader::from_content("{}", DocumentFormat::Json))
        .with_catalog(bank_catalog())
        .bootstrap();

    assert!(matches!(
        result,
        Err(BootstrapError::Config {
            source: ConfigError::ValidationError { .. }
        })
    ));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let file = document_file(".toml", "[[bean]\nid = ");
    let result = ContainerBuilder::new()
        .with_document(file.path())
        .with_catalog(bank_catalog())
        .bootstrap();

    assert!(matches!(
        result,
        Err(BootstrapError::Config {
            source: ConfigError::ParseError { format: "toml", .. }
        })
    ));
}

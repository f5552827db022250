//! 容器构建器

use crate::logging::LoggingConfig;
use ioc_abstractions::{ClassScanner, ConfigLoader, TypeResolver};
use ioc_common::{BootstrapError, BootstrapPolicy, ConfigError, MissingRefPolicy, TypeCatalog};
use ioc_config::DocumentConfigLoader;
use ioc_impl::{
    builtin_descriptors, AnnotationScanPass, BeanRegistry, BootstrapReport, BootstrapStatus,
    CatalogClassScanner, Container, Diagnostics, ExplicitWiringPass,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// 启动结果：只读容器与启动报告
#[derive(Debug)]
pub struct Bootstrapped {
    pub container: Container,
    pub report: BootstrapReport,
}

/// 容器构建器
///
/// 依次执行：加载配置 → 显式装配 → 扫描装配 → 冻结发布。
/// 构建器方法设置的策略优先于配置文档中的 `[container]` 设置。
pub struct ContainerBuilder {
    loader: Option<Box<dyn ConfigLoader>>,
    catalog: Option<Arc<TypeCatalog>>,
    scanner: Option<Arc<dyn ClassScanner>>,
    resolver: Option<Arc<dyn TypeResolver>>,
    policy: Option<BootstrapPolicy>,
    missing_ref: Option<MissingRefPolicy>,
    logging: Option<LoggingConfig>,
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            loader: None,
            catalog: None,
            scanner: None,
            resolver: None,
            policy: None,
            missing_ref: None,
            logging: None,
        }
    }

    /// 使用配置文档文件
    pub fn with_document<P: AsRef<Path>>(self, path: P) -> Self {
        info!("使用配置文档: {}", path.as_ref().display());
        self.with_config_loader(DocumentConfigLoader::from_path(path))
    }

    /// 使用自定义配置加载器
    pub fn with_config_loader<L: ConfigLoader + 'static>(mut self, loader: L) -> Self {
        debug!("设置配置加载器: {}", loader.name());
        self.loader = Some(Box::new(loader));
        self
    }

    /// 使用指定的类型目录（默认使用全局目录）
    pub fn with_catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 替换类型扫描器（默认基于类型目录）
    pub fn with_class_scanner(mut self, scanner: Arc<dyn ClassScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// 替换类型解析器（默认基于类型目录）
    pub fn with_type_resolver(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// 设置启动失败策略
    pub fn with_policy(mut self, policy: BootstrapPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// 设置引用缺失策略
    pub fn with_missing_ref_policy(mut self, policy: MissingRefPolicy) -> Self {
        self.missing_ref = Some(policy);
        self
    }

    /// 配置日志，启动时初始化全局 subscriber
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 启动容器
    pub fn bootstrap(self) -> Result<Bootstrapped, BootstrapError> {
        // 只有在明确配置了日志时才初始化日志
        if let Some(logging) = &self.logging {
            logging.init()?;
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("bootstrap", %run_id);
        let _entered = span.enter();
        info!("容器启动开始");

        let loader = self
            .loader
            .ok_or_else(|| ConfigError::validation("未设置配置加载器"))?;
        let definition = loader.load()?;

        let policy = self.policy.unwrap_or(definition.settings.policy);
        let missing_ref = self.missing_ref.unwrap_or(definition.settings.missing_ref);
        debug!("启动策略: {:?}, 引用缺失策略: {:?}", policy, missing_ref);

        let catalog = self.catalog.unwrap_or_else(TypeCatalog::global);
        for descriptor in builtin_descriptors() {
            if !catalog.contains(descriptor.name()) {
                catalog.register(descriptor);
            }
        }

        let catalog_scanner = Arc::new(CatalogClassScanner::new(catalog));
        let resolver = self
            .resolver
            .unwrap_or_else(|| catalog_scanner.clone() as Arc<dyn TypeResolver>);
        let scanner = self
            .scanner
            .unwrap_or_else(|| catalog_scanner as Arc<dyn ClassScanner>);

        let mut report = BootstrapReport::begin(run_id);
        let mut diagnostics = Diagnostics::new(policy);
        let mut registry = BeanRegistry::new();

        let explicit = ExplicitWiringPass::new(resolver)
            .with_missing_ref_policy(missing_ref)
            .run(&definition.beans, &mut registry, &mut diagnostics)?;

        let scanned = AnnotationScanPass::new(scanner)
            .with_missing_ref_policy(missing_ref)
            .run(&definition.scan_roots, &mut registry, &mut diagnostics)?;

        report.explicit_beans = explicit.instantiated;
        report.scanned_components = scanned.components;
        report.decorated_beans = scanned.decorated;
        let report = report.finish(diagnostics);

        match report.status() {
            BootstrapStatus::Success => info!("{}", report),
            BootstrapStatus::Partial => warn!("{}", report),
        }

        Ok(Bootstrapped {
            container: registry.freeze(),
            report,
        })
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

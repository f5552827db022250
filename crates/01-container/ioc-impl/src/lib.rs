//! # IoC 容器实现
//!
//! 启动期注册表、两个装配阶段，以及默认的扫描器与事务代理工厂。
//!
//! - [`BeanRegistry`] / [`Container`] - 启动期注册表与发布后的只读容器
//! - [`ExplicitWiringPass`] - 按组件定义实例化并装配属性
//! - [`AnnotationScanPass`] - 扫描带标记的类型、注入字段、事务装饰
//! - [`CatalogClassScanner`] - 基于类型目录的扫描器与类型解析器
//! - [`TransactionProxyFactory`] - 内置事务代理工厂
//! - [`BootstrapReport`] - 启动结果报告

pub mod catalog_scanner;
pub mod container;
pub mod explicit;
pub mod proxy;
pub mod registry;
pub mod report;
pub mod scan;

pub use catalog_scanner::*;
pub use container::*;
pub use explicit::*;
pub use proxy::*;
pub use registry::*;
pub use report::*;
pub use scan::*;

//! # IoC Common
//!
//! 容器各层共享的模型与工具。
//!
//! ## 核心组件
//!
//! - [`Bean`] - 类型擦除的组件实例句柄，携带能力视图
//! - [`TypeDescriptor`] - 编译期生成的类型元数据，取代运行时反射
//! - [`TypeCatalog`] - 按名称解析类型、按模块扫描类型的目录
//! - [`Injected`] - 可被容器注入的依赖槽
//! - [`TransactionBoundary`] / [`Transactional`] - 事务装饰约定
//! - [`ContainerDefinition`] - 配置加载产出的容器定义
//! - [`NamingConventions`] - id 与 setter 名称推导规则

pub mod bean;
pub mod catalog;
pub mod conventions;
pub mod definition;
pub mod errors;
pub mod metadata;
pub mod transaction;
pub mod wiring;

pub use bean::*;
pub use catalog::*;
pub use conventions::*;
pub use definition::*;
pub use errors::*;
pub use metadata::*;
pub use transaction::*;
pub use wiring::*;

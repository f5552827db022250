//! # IoC 组合层
//!
//! 把配置加载、显式装配和扫描装配组合成一次完整的容器启动。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use ioc_composition::{ContainerBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = ioc_composition::global::initialize(
//!         ContainerBuilder::new()
//!             .with_document("config/beans.toml")
//!             .with_logging(LoggingConfig::development()),
//!     )?;
//!     println!("{}", report);
//!
//!     let service = ioc_composition::global::lookup("transferService");
//!     assert!(service.is_some());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod global;
pub mod logging;

// 重新导出主要类型
pub use builder::{Bootstrapped, ContainerBuilder};
pub use logging::{LogFormat, LoggingConfig};

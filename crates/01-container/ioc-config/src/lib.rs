//! # IoC Config
//!
//! 容器配置文档的加载与验证，支持 TOML、JSON 和 YAML。
//!
//! - [`ContainerDocument`] - 文档结构
//! - [`DocumentConfigLoader`] - 从文件或字符串加载容器定义

pub mod document;
pub mod loader;

pub use document::*;
pub use loader::*;

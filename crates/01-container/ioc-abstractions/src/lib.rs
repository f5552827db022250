//! # IoC Abstractions
//!
//! 容器的协作方接口。启动流程只依赖这些 trait，具体实现可以替换。
//!
//! ## 核心接口
//!
//! - [`ConfigLoader`] - 把配置文档转换为容器定义
//! - [`ClassScanner`] - 在模块路径下查找带标记的类型
//! - [`TypeResolver`] - 按类型名称解析类型描述符
//! - [`ProxyFactory`] - 为组件构建事务代理
//! - [`BeanLookup`] - 按 id 查询组件

pub mod loader;
pub mod lookup;
pub mod proxy;
pub mod scanner;

pub use loader::*;
pub use lookup::*;
pub use proxy::*;
pub use scanner::*;

//! 配置加载器抽象接口

use ioc_common::{ConfigError, ContainerDefinition};
use std::sync::Arc;

/// 配置加载器 trait
///
/// 返回显式组件定义与扫描根；文档缺失或格式错误时返回 [`ConfigError`]。
pub trait ConfigLoader: Send + Sync {
    /// 加载容器定义
    fn load(&self) -> Result<ContainerDefinition, ConfigError>;

    /// 加载器名称，用于日志
    fn name(&self) -> &str;
}

/// 以代码方式构建的容器定义本身就是一个加载器
impl ConfigLoader for ContainerDefinition {
    fn load(&self) -> Result<ContainerDefinition, ConfigError> {
        Ok(self.clone())
    }

    fn name(&self) -> &str {
        "programmatic"
    }
}

impl<L: ConfigLoader + ?Sized> ConfigLoader for Arc<L> {
    fn load(&self) -> Result<ContainerDefinition, ConfigError> {
        (**self).load()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<L: ConfigLoader + ?Sized> ConfigLoader for Box<L> {
    fn load(&self) -> Result<ContainerDefinition, ConfigError> {
        (**self).load()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

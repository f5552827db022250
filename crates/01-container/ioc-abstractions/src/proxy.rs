//! 代理工厂抽象接口

use ioc_common::{Bean, ProxyError};

/// 代理工厂在注册表中的保留 id
pub const PROXY_FACTORY_ID: &str = "proxyFactory";

/// 代理工厂 trait
///
/// 返回与目标具有相同能力的装饰实例：每次调用前开启事务，
/// 成功后提交，失败后回滚。
pub trait ProxyFactory: Send + Sync {
    /// 构建事务代理
    fn wrap(&self, target: &Bean) -> Result<Bean, ProxyError>;
}

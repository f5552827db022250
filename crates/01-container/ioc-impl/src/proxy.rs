//! 事务代理工厂

use ioc_abstractions::ProxyFactory;
use ioc_common::{Bean, Injected, ProxyError, TransactionBoundary, TypeDescriptor};
use std::sync::Arc;
use tracing::debug;

/// 内置事务代理工厂的类型名称，可直接写在配置文档的 `class` 中
pub const TRANSACTION_PROXY_FACTORY_CLASS: &str = "ioc_impl::proxy::TransactionProxyFactory";

/// 事务代理工厂
///
/// 通过 `TransactionManager` 属性注入事务边界，
/// 对组件的所有事务能力构建包装实例。
#[derive(Debug, Default)]
pub struct TransactionProxyFactory {
    transaction_manager: Injected<dyn TransactionBoundary>,
}

impl TransactionProxyFactory {
    /// 创建未配置事务管理器的工厂
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建使用指定事务管理器的工厂
    pub fn with_transaction_manager(manager: Arc<dyn TransactionBoundary>) -> Self {
        Self {
            transaction_manager: Injected::with(manager),
        }
    }

    /// 设置事务管理器
    pub fn set_transaction_manager(&self, manager: Option<Arc<dyn TransactionBoundary>>) {
        self.transaction_manager.set(manager);
    }

    /// 是否已配置事务管理器
    pub fn is_configured(&self) -> bool {
        self.transaction_manager.is_present()
    }

    /// 类型描述符
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>()
            .named(TRANSACTION_PROXY_FACTORY_CLASS)
            .default_constructor()
            .exposes::<dyn ProxyFactory>(|this| this)
            .setter::<dyn TransactionBoundary>("set_transaction_manager", |this| {
                &this.transaction_manager
            })
            .build()
    }
}

impl ProxyFactory for TransactionProxyFactory {
    fn wrap(&self, target: &Bean) -> Result<Bean, ProxyError> {
        let boundary = self
            .transaction_manager
            .get()
            .ok_or(ProxyError::NotConfigured)?;

        let proxy = target
            .decorate(boundary)
            .ok_or_else(|| ProxyError::Unsupported {
                type_name: target.type_name().to_string(),
            })?;

        debug!(
            "已为 {} 创建事务代理: {:?}",
            target.type_name(),
            proxy.capability_names()
        );
        Ok(proxy)
    }
}

/// 容器内置的类型描述符
pub fn builtin_descriptors() -> Vec<TypeDescriptor> {
    vec![TransactionProxyFactory::descriptor()]
}

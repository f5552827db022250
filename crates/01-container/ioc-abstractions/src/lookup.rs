//! 组件查询接口

use ioc_common::Bean;
use std::sync::Arc;

/// 按 id 查询组件
///
/// 纯读取操作：不会按需创建组件，id 不存在时返回 `None`。
pub trait BeanLookup: Send + Sync {
    /// 按 id 查询组件实例
    fn lookup(&self, id: &str) -> Option<Bean>;

    /// 按 id 查询组件的能力视图
    fn lookup_capability<C>(&self, id: &str) -> Option<Arc<C>>
    where
        Self: Sized,
        C: ?Sized + 'static,
    {
        self.lookup(id)?.capability::<C>()
    }

    /// 按 id 查询具体类型实例
    fn lookup_concrete<T>(&self, id: &str) -> Option<Arc<T>>
    where
        Self: Sized,
        T: Send + Sync + 'static,
    {
        self.lookup(id)?.downcast::<T>()
    }
}

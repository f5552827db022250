//! 可注入字段

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// 可被容器注入的依赖槽
///
/// 组件实例由注册表共享持有，所以注入通过内部可变性完成。
/// 未注入或被显式注入为空时 [`Injected::get`] 返回 `None`。
pub struct Injected<C: ?Sized> {
    slot: RwLock<Option<Arc<C>>>,
}

impl<C: ?Sized> Injected<C> {
    /// 创建空的依赖槽
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// 创建已经持有依赖的槽
    pub fn with(value: Arc<C>) -> Self {
        Self {
            slot: RwLock::new(Some(value)),
        }
    }

    /// 当前注入的依赖
    pub fn get(&self) -> Option<Arc<C>> {
        self.slot.read().clone()
    }

    /// 写入依赖，`None` 表示显式注入空值
    pub fn set(&self, value: Option<Arc<C>>) {
        *self.slot.write() = value;
    }

    /// 是否已经持有依赖
    pub fn is_present(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<C: ?Sized> Default for Injected<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for Injected<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_present() { "present" } else { "absent" };
        f.debug_tuple("Injected").field(&state).finish()
    }
}

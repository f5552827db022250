//! 组件实例句柄
//!
//! [`Bean`] 是容器中保存的不透明实例：它携带自己的运行时类型，
//! 以及它对外暴露的能力视图（trait object）。

use crate::transaction::{TransactionBoundary, Transactional};
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的共享实例
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// 把某个能力视图包装成事务代理
type DecorateFn = fn(&AnyArc, Arc<dyn TransactionBoundary>) -> Option<CapabilityView>;

/// 能力视图：`handle` 中实际存放的是 `Arc<C>`
#[derive(Clone)]
struct CapabilityView {
    type_id: TypeId,
    type_name: &'static str,
    address: usize,
    handle: AnyArc,
    decorate: Option<DecorateFn>,
}

impl CapabilityView {
    fn of<C: ?Sized + Send + Sync + 'static>(view: Arc<C>, decorate: Option<DecorateFn>) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: type_name::<C>(),
            address: Arc::as_ptr(&view) as *const () as usize,
            handle: Arc::new(view),
            decorate,
        }
    }
}

/// 容器管理的组件实例
///
/// 克隆 `Bean` 只会增加引用计数，所有克隆指向同一个实例。
#[derive(Clone)]
pub struct Bean {
    object: AnyArc,
    type_name: &'static str,
    address: usize,
    views: Vec<CapabilityView>,
    decorated: bool,
}

impl Bean {
    /// 包装一个具体实例，自身类型即为第一个能力视图
    pub fn new<T: Send + Sync + 'static>(object: Arc<T>) -> Self {
        let address = Arc::as_ptr(&object) as *const () as usize;
        Self {
            views: vec![CapabilityView::of::<T>(object.clone(), None)],
            object,
            type_name: type_name::<T>(),
            address,
            decorated: false,
        }
    }

    /// 直接从值创建
    pub fn from_value<T: Send + Sync + 'static>(value: T) -> Self {
        Self::new(Arc::new(value))
    }

    /// 暴露一个能力视图
    ///
    /// `view` 必须与实例是同一个对象（通常是 `Arc<T>` 到 `Arc<dyn Trait>` 的转换）。
    pub fn exposing<C: ?Sized + Send + Sync + 'static>(self, view: Arc<C>) -> Self {
        self.push_view(CapabilityView::of::<C>(view, None))
    }

    /// 暴露一个可被事务装饰的能力视图
    pub fn exposing_transactional<C: ?Sized + Transactional>(self, view: Arc<C>) -> Self {
        self.push_view(CapabilityView::of::<C>(view, Some(decorate_view::<C>)))
    }

    fn push_view(mut self, view: CapabilityView) -> Self {
        self.views.retain(|existing| existing.type_id != view.type_id);
        self.views.push(view);
        self
    }

    /// 运行时类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 是否为事务代理
    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    /// 获取具体类型的实例
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.object.clone().downcast::<T>().ok()
    }

    /// 获取能力视图，例如 `bean.capability::<dyn TransferService>()`
    pub fn capability<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        let type_id = TypeId::of::<C>();
        self.views
            .iter()
            .find(|view| view.type_id == type_id)
            .and_then(|view| view.handle.downcast_ref::<Arc<C>>())
            .cloned()
    }

    /// 是否暴露指定能力
    pub fn exposes<C: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<C>();
        self.views.iter().any(|view| view.type_id == type_id)
    }

    /// 暴露的能力名称
    pub fn capability_names(&self) -> Vec<&'static str> {
        self.views.iter().map(|view| view.type_name).collect()
    }

    /// 是否存在可事务装饰的能力
    pub fn is_transactional(&self) -> bool {
        self.views.iter().any(|view| view.decorate.is_some())
    }

    /// 用事务边界装饰所有可装饰的能力，得到新的代理实例
    ///
    /// 可装饰的能力换成包装实例，其余能力原样保留并继续指向目标；
    /// 代理不再能够向下转换为具体类型。实例没有任何可装饰能力时返回 `None`。
    pub fn decorate(&self, boundary: Arc<dyn TransactionBoundary>) -> Option<Bean> {
        let concrete = (*self.object).type_id();
        let mut primary: Option<CapabilityView> = None;
        let mut views = Vec::with_capacity(self.views.len());

        for view in &self.views {
            match view.decorate {
                Some(decorate) => {
                    let decorated = decorate(&view.handle, boundary.clone())?;
                    primary.get_or_insert_with(|| decorated.clone());
                    views.push(decorated);
                }
                None if view.type_id == concrete => {}
                None => views.push(view.clone()),
            }
        }

        let primary = primary?;
        Some(Self {
            object: primary.handle,
            type_name: primary.type_name,
            address: primary.address,
            views,
            decorated: true,
        })
    }

    /// 两个句柄是否指向同一个实例
    pub fn same_instance(&self, other: &Bean) -> bool {
        self.address == other.address
    }
}

fn decorate_view<C: ?Sized + Transactional>(
    handle: &AnyArc,
    boundary: Arc<dyn TransactionBoundary>,
) -> Option<CapabilityView> {
    let target = handle.downcast_ref::<Arc<C>>()?.clone();
    Some(CapabilityView::of::<C>(
        C::decorate(target, boundary),
        Some(decorate_view::<C>),
    ))
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capability_names())
            .field("decorated", &self.decorated)
            .finish()
    }
}

/// 比较两个 `Arc` 是否指向同一个对象（忽略 trait object 的 vtable）
pub fn same_object<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

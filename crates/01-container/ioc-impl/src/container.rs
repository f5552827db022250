//! 只读容器

use ioc_abstractions::BeanLookup;
use ioc_common::Bean;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 启动完成后发布的只读容器
///
/// 克隆只复制引用，可以在线程之间共享。
#[derive(Clone)]
pub struct Container {
    beans: Arc<HashMap<String, Bean>>,
    order: Arc<[String]>,
}

impl Container {
    pub(crate) fn new(beans: HashMap<String, Bean>, order: Vec<String>) -> Self {
        Self {
            beans: Arc::new(beans),
            order: order.into(),
        }
    }

    /// 按 id 查询组件，不存在时返回 `None`
    pub fn lookup(&self, id: &str) -> Option<Bean> {
        self.beans.get(id).cloned()
    }

    /// 按 id 查询能力视图
    pub fn get<C: ?Sized + 'static>(&self, id: &str) -> Option<Arc<C>> {
        self.beans.get(id)?.capability::<C>()
    }

    /// 按 id 查询具体类型实例
    pub fn get_concrete<T: Send + Sync + 'static>(&self, id: &str) -> Option<Arc<T>> {
        self.beans.get(id)?.downcast::<T>()
    }

    /// 是否存在指定 id
    pub fn contains(&self, id: &str) -> bool {
        self.beans.contains_key(id)
    }

    /// 组件 id（首次注册顺序）
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// 组件数量
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl BeanLookup for Container {
    fn lookup(&self, id: &str) -> Option<Bean> {
        Container::lookup(self, id)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("beans", &self.order)
            .finish()
    }
}

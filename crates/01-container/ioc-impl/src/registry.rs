//! 启动期注册表

use crate::container::Container;
use ioc_abstractions::BeanLookup;
use ioc_common::Bean;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 启动期间使用的组件注册表
///
/// 由启动流程独占持有，覆盖写入是正常操作：[`BeanRegistry::insert`] 返回被替换的组件。
/// 启动结束后通过 [`BeanRegistry::freeze`] 发布为只读的 [`Container`]。
#[derive(Debug, Default)]
pub struct BeanRegistry {
    beans: HashMap<String, Bean>,
    order: Vec<String>,
}

impl BeanRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入组件，返回该 id 之前绑定的组件
    pub fn insert(&mut self, id: impl Into<String>, bean: Bean) -> Option<Bean> {
        let id = id.into();
        let previous = self.beans.insert(id.clone(), bean);
        match &previous {
            Some(old) => {
                let current = &self.beans[&id];
                if !old.same_instance(current) {
                    warn!(
                        "组件 {} 被覆盖: {} -> {}",
                        id,
                        old.type_name(),
                        current.type_name()
                    );
                }
            }
            None => {
                debug!("注册组件: {}", id);
                self.order.push(id);
            }
        }
        previous
    }

    /// 按 id 获取组件
    pub fn get(&self, id: &str) -> Option<&Bean> {
        self.beans.get(id)
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

    /// 冻结为只读容器
    pub fn freeze(self) -> Container {
        Container::new(self.beans, self.order)
    }
}

impl BeanLookup for BeanRegistry {
    fn lookup(&self, id: &str) -> Option<Bean> {
        self.get(id).cloned()
    }
}

//! 类型目录
//!
//! 保存所有可被容器按名称解析或扫描发现的类型描述符。
//! `#[derive(Bean)]` 生成的代码在程序启动时把描述符注册进全局目录。

use crate::conventions::NamingConventions;
use crate::metadata::{BeanType, TypeDescriptor};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, warn};

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: Lazy<Arc<TypeCatalog>> = Lazy::new(|| Arc::new(TypeCatalog::new()));

/// 类型目录
#[derive(Debug, Default)]
pub struct TypeCatalog {
    descriptors: DashMap<String, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取全局目录
    pub fn global() -> Arc<TypeCatalog> {
        GLOBAL_TYPE_CATALOG.clone()
    }

    /// 注册描述符，同名描述符会被替换
    pub fn register(&self, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        let descriptor = Arc::new(descriptor);
        let name = descriptor.name().to_string();
        if self
            .descriptors
            .insert(name.clone(), descriptor.clone())
            .is_some()
        {
            warn!("类型描述符被重复注册，已替换: {}", name);
        } else {
            debug!("注册类型描述符: {}", name);
        }
        descriptor
    }

    /// 注册实现了 [`BeanType`] 的类型
    pub fn register_type<T: BeanType>(&self) -> Arc<TypeDescriptor> {
        self.register(T::descriptor())
    }

    /// 链式注册，便于构建独立目录
    pub fn with(self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// 链式注册 [`BeanType`]
    pub fn with_type<T: BeanType>(self) -> Self {
        self.with(T::descriptor())
    }

    /// 按完整类型名称查找，`.` 与 `::` 分隔均可
    pub fn get(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        let name = NamingConventions::normalize_path(name);
        self.descriptors.get(&name).map(|entry| entry.value().clone())
    }

    /// 是否包含指定类型
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors
            .contains_key(&NamingConventions::normalize_path(name))
    }

    /// 全部描述符，按名称排序
    pub fn descriptors(&self) -> Vec<Arc<TypeDescriptor>> {
        let mut descriptors: Vec<_> = self
            .descriptors
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        descriptors.sort_by(|a, b| a.name().cmp(b.name()));
        descriptors
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

//! 基于类型目录的扫描器

use ioc_abstractions::{ClassScanner, TypeResolver};
use ioc_common::{
    ClassResolutionError, Marker, NamingConventions, ScanError, TypeCatalog, TypeDescriptor,
};
use std::sync::Arc;
use tracing::debug;

/// 在 [`TypeCatalog`] 上实现类型扫描与按名称解析
#[derive(Debug, Clone)]
pub struct CatalogClassScanner {
    catalog: Arc<TypeCatalog>,
}

impl CatalogClassScanner {
    /// 基于指定目录创建扫描器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    /// 基于全局目录创建扫描器
    pub fn global() -> Self {
        Self::new(TypeCatalog::global())
    }

    /// 底层目录
    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }
}

impl ClassScanner for CatalogClassScanner {
    fn scan(
        &self,
        package_path: &str,
        marker: Marker,
    ) -> Result<Vec<Arc<TypeDescriptor>>, ScanError> {
        let root = NamingConventions::normalize_path(package_path);
        if root.is_empty() {
            return Err(ScanError::InvalidPath {
                path: package_path.to_string(),
            });
        }

        let found: Vec<_> = self
            .catalog
            .descriptors()
            .into_iter()
            .filter(|descriptor| descriptor.has_marker(marker))
            .filter(|descriptor| NamingConventions::is_within(descriptor.module_path(), &root))
            .collect();

        debug!("扫描 {} [{}]: 发现 {} 个类型", root, marker, found.len());
        Ok(found)
    }
}

impl TypeResolver for CatalogClassScanner {
    fn resolve(&self, class_name: &str) -> Result<Arc<TypeDescriptor>, ClassResolutionError> {
        self.catalog
            .get(class_name)
            .ok_or_else(|| ClassResolutionError::new(class_name))
    }
}

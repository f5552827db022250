//! 类型扫描与解析抽象接口

use ioc_common::{ClassResolutionError, Marker, ScanError, TypeDescriptor};
use std::sync::Arc;

/// 类型扫描器 trait
///
/// 返回模块路径（递归）下所有带指定标记的具体类型。
pub trait ClassScanner: Send + Sync {
    /// 扫描带标记的类型
    fn scan(&self, package_path: &str, marker: Marker)
        -> Result<Vec<Arc<TypeDescriptor>>, ScanError>;
}

/// 类型解析器 trait
pub trait TypeResolver: Send + Sync {
    /// 按完整类型名称解析
    fn resolve(&self, class_name: &str) -> Result<Arc<TypeDescriptor>, ClassResolutionError>;
}

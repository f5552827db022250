//! 容器定义模型
//!
//! 配置加载器产出的显式组件定义、扫描根以及容器设置

use crate::conventions::NamingConventions;
use serde::{Deserialize, Serialize};

/// 属性引用：`{name, ref}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReference {
    /// 属性名称，对应 `set<Name>` setter
    pub name: String,
    /// 引用的组件 id
    pub reference: String,
}

impl PropertyReference {
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
        }
    }
}

/// 显式组件定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDefinition {
    /// 组件 id
    pub id: String,
    /// 类型引用（完整类型路径，`::` 或 `.` 分隔）
    pub type_ref: String,
    /// 有序的属性引用
    pub properties: Vec<PropertyReference>,
}

impl BeanDefinition {
    /// 创建新的组件定义
    pub fn new(id: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_ref: type_ref.into(),
            properties: Vec::new(),
        }
    }

    /// 添加属性引用
    pub fn with_property(mut self, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.properties.push(PropertyReference::new(name, reference));
        self
    }
}

/// 扫描根
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRoot {
    /// 包路径
    pub package_path: String,
}

impl ScanRoot {
    /// 创建扫描根，路径分隔符统一为 `::`
    pub fn new(package_path: impl AsRef<str>) -> Self {
        Self {
            package_path: NamingConventions::normalize_path(package_path.as_ref()),
        }
    }
}

/// 启动失败策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPolicy {
    /// 记录错误并继续，得到部分填充的容器
    #[default]
    Partial,
    /// 遇到第一个错误立即终止
    FailFast,
}

/// 引用组件缺失时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRefPolicy {
    /// 以空值调用 setter / 写入字段
    #[default]
    InjectAbsent,
    /// 跳过注入
    Skip,
    /// 记录为注入错误
    Fail,
}

/// 容器设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// 启动失败策略
    pub policy: BootstrapPolicy,
    /// 引用缺失策略
    pub missing_ref: MissingRefPolicy,
}

/// 完整的容器定义
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDefinition {
    /// 显式组件定义（按文档顺序）
    pub beans: Vec<BeanDefinition>,
    /// 扫描根（按文档顺序）
    pub scan_roots: Vec<ScanRoot>,
    /// 容器设置
    pub settings: ContainerSettings,
}

impl ContainerDefinition {
    /// 创建空定义
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加组件定义
    pub fn with_bean(mut self, bean: BeanDefinition) -> Self {
        self.beans.push(bean);
        self
    }

    /// 添加扫描根
    pub fn with_scan_root(mut self, package_path: impl AsRef<str>) -> Self {
        self.scan_roots.push(ScanRoot::new(package_path));
        self
    }

    /// 设置容器设置
    pub fn with_settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = settings;
        self
    }
}

//! 配置文档结构
//!
//! ```toml
//! [container]
//! policy = "partial"
//! missing_ref = "inject_absent"
//!
//! [[bean]]
//! id = "transferService"
//! class = "bank::service::TransferServiceImpl"
//!
//!   [[bean.property]]
//!   name = "AccountDao"
//!   ref = "accountDao"
//!
//! [[scan]]
//! package = "bank::service"
//! ```

use ioc_common::{
    BeanDefinition, BoxError, ConfigError, ContainerDefinition, ContainerSettings, PropertyReference,
    ScanRoot,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// 文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| extension.parse().ok())
    }

    /// 格式名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// 解析文档内容
    pub fn parse(&self, content: &str) -> Result<ContainerDocument, ConfigError> {
        let parsed: Result<ContainerDocument, BoxError> = match self {
            Self::Toml => toml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
            Self::Yaml => serde_yaml::from_str(content).map_err(Into::into),
        };
        parsed.map_err(|source| ConfigError::ParseError {
            format: self.name(),
            source,
        })
    }
}

impl FromStr for DocumentFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 属性条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// 组件条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanEntry {
    pub id: String,
    pub class: String,
    #[serde(default, rename = "property", alias = "properties")]
    pub properties: Vec<PropertyEntry>,
}

/// 扫描条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    #[serde(alias = "value")]
    pub package: String,
}

/// 容器配置文档
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDocument {
    #[serde(default)]
    pub container: ContainerSettings,
    #[serde(default, rename = "bean", alias = "beans")]
    pub beans: Vec<BeanEntry>,
    #[serde(default, rename = "scan", alias = "scans")]
    pub scans: Vec<ScanEntry>,
}

impl ContainerDocument {
    /// 验证文档
    ///
    /// 重复的组件 id 不是错误（后者覆盖前者），只记录警告。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beans.is_empty() && self.scans.is_empty() {
            return Err(ConfigError::validation("文档中既没有组件定义也没有扫描根"));
        }

        let mut seen = HashSet::new();
        for (index, bean) in self.beans.iter().enumerate() {
            if bean.id.trim().is_empty() {
                return Err(ConfigError::validation(format!("第 {} 个组件缺少 id", index + 1)));
            }
            if bean.class.trim().is_empty() {
                return Err(ConfigError::validation(format!("组件 {} 缺少 class", bean.id)));
            }
            for property in &bean.properties {
                if property.name.trim().is_empty() || property.reference.trim().is_empty() {
                    return Err(ConfigError::validation(format!(
                        "组件 {} 的属性必须同时提供 name 和 ref",
                        bean.id
                    )));
                }
            }
            if !seen.insert(bean.id.as_str()) {
                warn!("组件 id 重复: {}，后定义的组件将覆盖前者", bean.id);
            }
        }

        if let Some(index) = self
            .scans
            .iter()
            .position(|scan| scan.package.trim().is_empty())
        {
            return Err(ConfigError::validation(format!(
                "第 {} 个扫描根缺少 package",
                index + 1
            )));
        }

        Ok(())
    }

    /// 转换为容器定义
    pub fn into_definition(self) -> ContainerDefinition {
        ContainerDefinition {
            beans: self
                .beans
                .into_iter()
                .map(|bean| BeanDefinition {
                    id: bean.id.trim().to_string(),
                    type_ref: bean.class.trim().to_string(),
                    properties: bean
                        .properties
                        .into_iter()
                        .map(|property| {
                            PropertyReference::new(property.name.trim(), property.reference.trim())
                        })
                        .collect(),
                })
                .collect(),
            scan_roots: self
                .scans
                .iter()
                .map(|scan| ScanRoot::new(&scan.package))
                .collect(),
            settings: self.container,
        }
    }
}

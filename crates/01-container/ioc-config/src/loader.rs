//! 文档配置加载器

use crate::document::{ContainerDocument, DocumentFormat};
use ioc_abstractions::ConfigLoader;
use ioc_common::{ConfigError, ContainerDefinition};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum DocumentSource {
    File(PathBuf),
    Inline { content: String, format: DocumentFormat },
}

/// 从 TOML / JSON / YAML 文档加载容器定义
#[derive(Debug, Clone)]
pub struct DocumentConfigLoader {
    source: DocumentSource,
    name: String,
}

impl DocumentConfigLoader {
    /// 从文件加载，格式由扩展名决定
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            source: DocumentSource::File(path),
        }
    }

    /// 从字符串加载
    pub fn from_content(content: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            name: format!("inline-{}", format),
            source: DocumentSource::Inline {
                content: content.into(),
                format,
            },
        }
    }

    /// 读取并解析文档，不做验证
    pub fn read_document(&self) -> Result<ContainerDocument, ConfigError> {
        match &self.source {
            DocumentSource::File(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                let format =
                    DocumentFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
                        path: path.display().to_string(),
                    })?;

                debug!("读取配置文档: {} ({})", path.display(), format);
                let content = std::fs::read_to_string(path)?;
                format.parse(&content)
            }
            DocumentSource::Inline { content, format } => format.parse(content),
        }
    }
}

impl ConfigLoader for DocumentConfigLoader {
    fn load(&self) -> Result<ContainerDefinition, ConfigError> {
        let document = self.read_document()?;
        document.validate()?;

        let definition = document.into_definition();
        info!(
            "配置文档 {} 加载完成: {} 个组件定义, {} 个扫描根",
            self.name,
            definition.beans.len(),
            definition.scan_roots.len()
        );
        Ok(definition)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

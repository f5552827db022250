//! 日志配置

use ioc_common::BootstrapError;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人类可读的文本
    #[default]
    Text,
    /// 每行一个 JSON 对象
    Json,
}

/// 容器启动时安装的日志 subscriber
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `RUST_LOG` 存在时以环境变量为准
    pub level: tracing::Level,
    pub format: LogFormat,
    /// 输出源文件与行号
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            format: LogFormat::Text,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// 调试用：DEBUG 级别并带源码位置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            source_location: true,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// 安装全局 subscriber
    ///
    /// 进程中已经存在 subscriber 时返回 [`BootstrapError::Logging`]。
    pub fn init(&self) -> Result<(), BootstrapError> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_ascii_lowercase()));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_file(self.source_location)
            .with_line_number(self.source_location);

        let installed = match self.format {
            LogFormat::Json => subscriber.json().try_init(),
            LogFormat::Text => subscriber.try_init(),
        };
        installed.map_err(|e| BootstrapError::Logging {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

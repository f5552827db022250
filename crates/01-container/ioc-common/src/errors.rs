//! 错误类型定义

use thiserror::Error;

/// 装箱的通用错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("不支持的配置文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置解析失败 ({format}): {source}")]
    ParseError {
        format: &'static str,
        source: BoxError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 类型解析错误：声明的类型名称无法解析
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法解析类型: {class_name}")]
pub struct ClassResolutionError {
    /// 配置中声明的类型名称
    pub class_name: String,
}

impl ClassResolutionError {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

/// 实例化错误
#[derive(Error, Debug)]
pub enum InstantiationError {
    #[error("类型没有可用的默认构造器: {type_name}")]
    NoDefaultConstructor { type_name: String },

    #[error("构造器执行失败: {type_name}, 原因: {source}")]
    ConstructorFailed { type_name: String, source: BoxError },
}

/// 注入访问错误（setter 或字段注入失败）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionAccessError {
    #[error("注入目标类型不匹配: {member} 期望 {expected}, 实际 {actual}")]
    TargetTypeMismatch {
        member: String,
        expected: String,
        actual: String,
    },

    #[error("注入值不具备所需能力: {member} 期望 {expected}, 实际 {actual}")]
    IncompatibleValue {
        member: String,
        expected: String,
        actual: String,
    },

    #[error("注入目标不存在: {id}")]
    TargetMissing { id: String },

    #[error("引用的组件不存在: {member} -> {reference}")]
    MissingReference { member: String, reference: String },
}

/// 代理构建错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("组件没有可装饰的事务能力: {type_name}")]
    Unsupported { type_name: String },

    #[error("代理工厂尚未配置事务管理器")]
    NotConfigured,

    #[error("代理工厂未注册: {id}")]
    FactoryMissing { id: String },

    #[error("组件不是代理工厂: {id} ({actual})")]
    FactoryNotCapable { id: String, actual: String },
}

/// 组件扫描错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("扫描路径无效: {path}")]
    InvalidPath { path: String },

    #[error("组件扫描失败: {message}")]
    ScanFailed { message: String },
}

impl ScanError {
    /// 创建扫描失败错误
    pub fn scan_failed(message: impl Into<String>) -> Self {
        Self::ScanFailed {
            message: message.into(),
        }
    }
}

/// 事务边界错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("开启事务失败: {message}")]
    Begin { message: String },

    #[error("提交事务失败: {message}")]
    Commit { message: String },

    #[error("回滚事务失败: {message}")]
    Rollback { message: String },
}

/// 启动阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapPhase {
    /// 加载配置
    Configuration,
    /// 显式组件实例化
    Instantiation,
    /// 属性装配
    PropertyWiring,
    /// 组件发现
    ComponentDiscovery,
    /// 字段注入
    FieldInjection,
    /// 事务装饰
    TransactionalDecoration,
}

impl std::fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Instantiation => "instantiation",
            Self::PropertyWiring => "property-wiring",
            Self::ComponentDiscovery => "component-discovery",
            Self::FieldInjection => "field-injection",
            Self::TransactionalDecoration => "transactional-decoration",
        };
        f.write_str(name)
    }
}

/// 启动错误类型
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("组件 {bean_id} 类型解析失败: {source}")]
    ClassResolution {
        bean_id: String,
        source: ClassResolutionError,
    },

    #[error("组件 {bean_id} 实例化失败 [{phase}]: {source}")]
    Instantiation {
        bean_id: String,
        phase: BootstrapPhase,
        source: InstantiationError,
    },

    #[error("组件 {bean_id} 注入失败 [{phase}]: {source}")]
    ReflectionAccess {
        bean_id: String,
        phase: BootstrapPhase,
        source: ReflectionAccessError,
    },

    #[error("组件 {bean_id} 事务装饰失败: {source}")]
    Proxy { bean_id: String, source: ProxyError },

    #[error("扫描根 {root} 扫描失败: {source}")]
    Scan { root: String, source: ScanError },

    #[error("容器已经初始化，不能重复启动")]
    AlreadyInitialized,

    #[error("日志初始化失败: {message}")]
    Logging { message: String },
}

impl BootstrapError {
    /// 错误发生的阶段
    pub fn phase(&self) -> BootstrapPhase {
        match self {
            Self::Config { .. } | Self::AlreadyInitialized | Self::Logging { .. } => {
                BootstrapPhase::Configuration
            }
            Self::ClassResolution { .. } => BootstrapPhase::Instantiation,
            Self::Instantiation { phase, .. } | Self::ReflectionAccess { phase, .. } => *phase,
            Self::Proxy { .. } => BootstrapPhase::TransactionalDecoration,
            Self::Scan { .. } => BootstrapPhase::ComponentDiscovery,
        }
    }

    /// 出错的组件 id（如果有）
    pub fn bean_id(&self) -> Option<&str> {
        match self {
            Self::ClassResolution { bean_id, .. }
            | Self::Instantiation { bean_id, .. }
            | Self::ReflectionAccess { bean_id, .. }
            | Self::Proxy { bean_id, .. } => Some(bean_id),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type InstantiationResult<T> = Result<T, InstantiationError>;
pub type InjectionResult<T> = Result<T, ReflectionAccessError>;
pub type ProxyResult<T> = Result<T, ProxyError>;
pub type BootstrapResult<T> = Result<T, BootstrapError>;

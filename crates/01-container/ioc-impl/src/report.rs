//! 启动结果报告

use chrono::{DateTime, Utc};
use ioc_common::{BootstrapError, BootstrapPolicy};
use std::fmt;
use tracing::error;
use uuid::Uuid;

/// 启动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    /// 没有任何错误
    Success,
    /// 部分组件失败，容器仍然可用
    Partial,
}

impl fmt::Display for BootstrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Partial => f.write_str("partial"),
        }
    }
}

/// 错误收集器
///
/// `Partial` 策略下记录错误并继续；`FailFast` 策略下第一个错误直接返回。
#[derive(Debug)]
pub struct Diagnostics {
    policy: BootstrapPolicy,
    errors: Vec<BootstrapError>,
}

impl Diagnostics {
    /// 按策略创建收集器
    pub fn new(policy: BootstrapPolicy) -> Self {
        Self {
            policy,
            errors: Vec::new(),
        }
    }

    /// 当前策略
    pub fn policy(&self) -> BootstrapPolicy {
        self.policy
    }

    /// 记录错误
    pub fn record(&mut self, failure: BootstrapError) -> Result<(), BootstrapError> {
        error!(phase = %failure.phase(), "{}", failure);
        match self.policy {
            BootstrapPolicy::FailFast => Err(failure),
            BootstrapPolicy::Partial => {
                self.errors.push(failure);
                Ok(())
            }
        }
    }

    /// 已记录的错误
    pub fn errors(&self) -> &[BootstrapError] {
        &self.errors
    }

    /// 取出已记录的错误
    pub fn into_errors(self) -> Vec<BootstrapError> {
        self.errors
    }
}

/// 启动报告
#[derive(Debug)]
pub struct BootstrapReport {
    /// 本次启动的唯一标识
    pub run_id: Uuid,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 结束时间
    pub finished_at: DateTime<Utc>,
    /// 显式定义并成功实例化的组件数量
    pub explicit_beans: usize,
    /// 扫描发现的组件数量
    pub scanned_components: usize,
    /// 被事务代理替换的组件数量
    pub decorated_beans: usize,
    /// 记录的非致命错误
    pub errors: Vec<BootstrapError>,
}

impl BootstrapReport {
    /// 创建空报告，开始时间为当前时间
    pub fn begin(run_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            run_id,
            started_at: now,
            finished_at: now,
            explicit_beans: 0,
            scanned_components: 0,
            decorated_beans: 0,
            errors: Vec::new(),
        }
    }

    /// 完成报告
    pub fn finish(mut self, diagnostics: Diagnostics) -> Self {
        self.errors = diagnostics.into_errors();
        self.finished_at = Utc::now();
        self
    }

    /// 启动状态
    pub fn status(&self) -> BootstrapStatus {
        if self.errors.is_empty() {
            BootstrapStatus::Success
        } else {
            BootstrapStatus::Partial
        }
    }

    /// 启动耗时
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

impl fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bootstrap {} [{}]: explicit={}, scanned={}, decorated={}, errors={}, elapsed={}ms",
            self.run_id,
            self.status(),
            self.explicit_beans,
            self.scanned_components,
            self.decorated_beans,
            self.errors.len(),
            self.elapsed().num_milliseconds()
        )
    }
}

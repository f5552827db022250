//! 事务边界与事务装饰约定
//!
//! 能力 trait 通过为其 trait object 实现 [`Transactional`] 来声明自己可以被事务装饰。
//! 装饰器是一个显式的包装类型：持有被包装的目标，并在每个方法调用外层
//! 使用 [`in_transaction`] 建立事务边界。
//!
//! ```rust
//! use std::sync::Arc;
//! use ioc_common::{in_transaction, TransactionBoundary, TransactionError, Transactional};
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> Result<String, TransactionError>;
//! }
//!
//! struct TransactionalGreeter {
//!     target: Arc<dyn Greeter>,
//!     boundary: Arc<dyn TransactionBoundary>,
//! }
//!
//! impl Greeter for TransactionalGreeter {
//!     fn greet(&self) -> Result<String, TransactionError> {
//!         in_transaction(self.boundary.as_ref(), || self.target.greet())
//!     }
//! }
//!
//! impl Transactional for dyn Greeter {
//!     fn decorate(target: Arc<Self>, boundary: Arc<dyn TransactionBoundary>) -> Arc<Self> {
//!         Arc::new(TransactionalGreeter { target, boundary })
//!     }
//! }
//! ```

use crate::errors::TransactionError;
use std::sync::Arc;
use tracing::{debug, error};

/// 事务边界
///
/// 代理工厂在每次调用前开启事务，成功后提交，失败后回滚。
pub trait TransactionBoundary: Send + Sync {
    /// 开启事务
    fn begin(&self) -> Result<(), TransactionError>;

    /// 提交事务
    fn commit(&self) -> Result<(), TransactionError>;

    /// 回滚事务
    fn rollback(&self) -> Result<(), TransactionError>;
}

/// 可被事务装饰的能力
///
/// 为能力 trait 的 trait object（例如 `dyn TransferService`）实现，
/// 返回一个具有相同能力、但每次调用都经过事务边界的包装实例。
pub trait Transactional: Send + Sync + 'static {
    /// 构建包装实例
    fn decorate(target: Arc<Self>, boundary: Arc<dyn TransactionBoundary>) -> Arc<Self>;
}

/// 在事务边界内执行操作
///
/// 开启 → 执行 → 成功提交 / 失败回滚。提交失败同样回滚，并返回提交错误。
/// 回滚自身失败时只记录日志，调用方拿到的仍然是原始错误。
pub fn in_transaction<T, E, F>(boundary: &dyn TransactionBoundary, op: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<TransactionError>,
{
    boundary.begin()?;
    debug!("事务已开启");

    match op() {
        Ok(value) => match boundary.commit() {
            Ok(()) => {
                debug!("事务已提交");
                Ok(value)
            }
            Err(commit_error) => {
                error!("事务提交失败: {}", commit_error);
                rollback(boundary);
                Err(commit_error.into())
            }
        },
        Err(e) => {
            rollback(boundary);
            Err(e)
        }
    }
}

fn rollback(boundary: &dyn TransactionBoundary) {
    if let Err(rollback_error) = boundary.rollback() {
        error!("事务回滚失败: {}", rollback_error);
    } else {
        debug!("事务已回滚");
    }
}

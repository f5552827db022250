//! 转账服务

use crate::dao::AccountDao;
use bean_macros::Bean;
use ioc_common::{in_transaction, Injected, TransactionBoundary, TransactionError, Transactional};
use std::sync::Arc;
use thiserror::Error;

/// 转账错误
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("事务失败: {0}")]
    Transaction(#[from] TransactionError),

    #[error("账户不存在: {0}")]
    UnknownAccount(String),

    #[error("余额不足: {card}, 当前余额 {balance}")]
    InsufficientFunds { card: String, balance: i64 },

    #[error("依赖未装配: {0}")]
    NotWired(&'static str),
}

pub trait TransferService: Send + Sync {
    fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<(), TransferError>;
}

/// 先扣款后入账，入账失败时依赖事务回滚恢复扣款
#[derive(Bean, Default)]
#[bean(component, transactional, exposes = dyn TransferService)]
pub struct TransferServiceImpl {
    #[property]
    account_dao: Injected<dyn AccountDao>,
}

impl TransferService for TransferServiceImpl {
    fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<(), TransferError> {
        let dao = self
            .account_dao
            .get()
            .ok_or(TransferError::NotWired("accountDao"))?;

        let balance = dao
            .balance(from)
            .ok_or_else(|| TransferError::UnknownAccount(from.to_string()))?;
        if balance < amount {
            return Err(TransferError::InsufficientFunds {
                card: from.to_string(),
                balance,
            });
        }
        dao.update(from, balance - amount);

        let target = dao
            .balance(to)
            .ok_or_else(|| TransferError::UnknownAccount(to.to_string()))?;
        dao.update(to, target + amount);
        Ok(())
    }
}

struct TransactionalTransferService {
    target: Arc<dyn TransferService>,
    boundary: Arc<dyn TransactionBoundary>,
}

impl TransferService for TransactionalTransferService {
    fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<(), TransferError> {
        in_transaction(self.boundary.as_ref(), || self.target.transfer(from, to, amount))
    }
}

impl Transactional for dyn TransferService {
    fn decorate(target: Arc<Self>, boundary: Arc<dyn TransactionBoundary>) -> Arc<Self> {
        Arc::new(TransactionalTransferService { target, boundary })
    }
}

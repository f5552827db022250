//! 内存事务管理器

use crate::dao::{DataSource, Snapshot};
use bean_macros::Bean;
use ioc_common::{Injected, TransactionBoundary, TransactionError};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// 开启事务时保存数据源快照，回滚时恢复
#[derive(Bean, Default)]
#[bean(exposes = dyn TransactionBoundary)]
pub struct MemoryTransactionManager {
    #[property]
    data_source: Injected<dyn DataSource>,
    pending: Mutex<Option<Snapshot>>,
    journal: Mutex<Vec<&'static str>>,
}

impl MemoryTransactionManager {
    /// 事务操作记录
    pub fn journal(&self) -> Vec<&'static str> {
        self.journal.lock().clone()
    }
}

impl TransactionBoundary for MemoryTransactionManager {
    fn begin(&self) -> Result<(), TransactionError> {
        let data_source = self.data_source.get().ok_or_else(|| TransactionError::Begin {
            message: "未配置数据源".to_string(),
        })?;
        let snapshot = data_source.snapshot();
        let mut pending = self.pending.lock();
        if pending.is_some() {
            return Err(TransactionError::Begin {
                message: "不支持嵌套事务".to_string(),
            });
        }
        *pending = Some(snapshot);
        self.journal.lock().push("begin");
        debug!("事务开始");
        Ok(())
    }

    fn commit(&self) -> Result<(), TransactionError> {
        self.pending.lock().take();
        self.journal.lock().push("commit");
        debug!("事务提交");
        Ok(())
    }

    fn rollback(&self) -> Result<(), TransactionError> {
        let snapshot = self.pending.lock().take().ok_or(TransactionError::Rollback {
            message: "没有进行中的事务".to_string(),
        })?;
        let data_source = self.data_source.get().ok_or_else(|| TransactionError::Rollback {
            message: "未配置数据源".to_string(),
        })?;
        data_source.restore(snapshot);
        self.journal.lock().push("rollback");
        warn!("事务已回滚");
        Ok(())
    }
}

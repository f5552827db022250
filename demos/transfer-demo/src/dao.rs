//! 账户数据访问

use bean_macros::Bean;
use parking_lot::Mutex;
use std::collections::HashMap;

/// 账户余额快照
pub type Snapshot = HashMap<String, i64>;

/// 账户数据访问接口
pub trait AccountDao: Send + Sync {
    fn balance(&self, card: &str) -> Option<i64>;
    fn update(&self, card: &str, balance: i64);
    fn cards(&self) -> Vec<String>;
}

/// 支持快照与恢复的数据源，供事务管理器回滚使用
pub trait DataSource: Send + Sync {
    fn snapshot(&self) -> Snapshot;
    fn restore(&self, snapshot: Snapshot);
}

/// 内存中的账户表
#[derive(Bean)]
#[bean(exposes = dyn AccountDao, exposes = dyn DataSource)]
pub struct JdbcAccountDao {
    accounts: Mutex<Snapshot>,
}

impl Default for JdbcAccountDao {
    fn default() -> Self {
        let accounts = [
            ("6029621011000".to_string(), 10_000),
            ("6029621011001".to_string(), 10_000),
        ];
        Self {
            accounts: Mutex::new(accounts.into_iter().collect()),
        }
    }
}

impl AccountDao for JdbcAccountDao {
    fn balance(&self, card: &str) -> Option<i64> {
        self.accounts.lock().get(card).copied()
    }

    fn update(&self, card: &str, balance: i64) {
        self.accounts.lock().insert(card.to_string(), balance);
    }

    fn cards(&self) -> Vec<String> {
        let mut cards: Vec<_> = self.accounts.lock().keys().cloned().collect();
        cards.sort();
        cards
    }
}

impl DataSource for JdbcAccountDao {
    fn snapshot(&self) -> Snapshot {
        self.accounts.lock().clone()
    }

    fn restore(&self, snapshot: Snapshot) {
        *self.accounts.lock() = snapshot;
    }
}

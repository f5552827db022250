//! 账户查询入口，由扫描发现并注入

use crate::dao::AccountDao;
use bean_macros::Bean;
use ioc_common::Injected;

#[derive(Bean, Default)]
#[bean(component)]
pub struct TransferController {
    #[inject]
    account_dao: Injected<dyn AccountDao>,
}

impl TransferController {
    /// 全部账户余额
    pub fn balances(&self) -> Vec<(String, i64)> {
        let Some(dao) = self.account_dao.get() else {
            return Vec::new();
        };
        dao.cards()
            .into_iter()
            .filter_map(|card| dao.balance(&card).map(|balance| (card, balance)))
            .collect()
    }
}

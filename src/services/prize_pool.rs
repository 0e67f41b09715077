use chrono::{DateTime, Utc};

use crate::entities::prize_entity as prizes;
use crate::error::AppResult;
use crate::store::PrizeStore;

/// 奖池快照
///
/// 每次抽奖从内容库重新拉取一份，不做增量更新。记录顺序即内容库
/// 返回顺序，加权游走在浮点边界上的平手归先遍历到的记录。
#[derive(Debug, Clone)]
pub struct PrizePool {
    records: Vec<prizes::Model>,
}

impl PrizePool {
    /// 拉取当前奖品并做记录级校验。
    /// 窗口倒置或库存缺失的记录剔除并告警，奖池用剩余的合法记录继续工作。
    pub async fn load(store: &dyn PrizeStore, now: DateTime<Utc>) -> AppResult<PrizePool> {
        let fetched = store.fetch_active_prizes(now).await?;
        Ok(Self::from_records(fetched))
    }

    pub fn from_records(fetched: Vec<prizes::Model>) -> PrizePool {
        let mut records = Vec::with_capacity(fetched.len());
        for record in fetched {
            match record.validate() {
                Ok(()) => records.push(record),
                Err(e) => log::warn!("Excluding malformed prize record: {e}"),
            }
        }
        PrizePool { records }
    }

    pub fn records(&self) -> &[prizes::Model] {
        &self.records
    }

    pub fn into_records(self) -> Vec<prizes::Model> {
        self.records
    }

    /// 快照内记录条数，时间衰减因子取平均时的分母（与库存无关）
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// 全部奖品剩余库存之和
    pub fn total_remaining_quantity(&self) -> i64 {
        self.records.iter().map(|r| r.quantity()).sum()
    }

    /// 库存耗尽的奖池不再派奖
    pub fn has_remaining_prizes(&self) -> bool {
        self.total_remaining_quantity() > 0
    }
}

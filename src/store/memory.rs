use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::PrizeStore;
use crate::entities::prize_entity as prizes;
use crate::error::AppResult;

/// In-memory store for service tests. The mutex serializes quantity
/// mutation, giving the same exactly-once decrement the SQL store gets
/// from its conditional UPDATE.
#[derive(Clone, Default)]
pub struct MemoryPrizeStore {
    records: Arc<Mutex<Vec<prizes::Model>>>,
}

impl MemoryPrizeStore {
    pub fn new(records: Vec<prizes::Model>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub async fn quantity_of(&self, prize_id: i64) -> Option<i64> {
        self.records
            .lock()
            .await
            .iter()
            .find(|p| p.id == prize_id)
            .and_then(|p| p.quantity_remaining)
    }
}

#[async_trait]
impl PrizeStore for MemoryPrizeStore {
    async fn fetch_active_prizes(&self, now: DateTime<Utc>) -> AppResult<Vec<prizes::Model>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|p| p.is_active && p.start_time <= now)
            .cloned()
            .collect())
    }

    async fn decrement_quantity(&self, prize_id: i64) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|p| p.id == prize_id) {
            Some(p) => match p.quantity_remaining {
                Some(q) if q > 0 => {
                    p.quantity_remaining = Some(q - 1);
                    Ok(true)
                }
                _ => Ok(false),
            },
            None => Ok(false),
        }
    }
}

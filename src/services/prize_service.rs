use std::sync::Arc;

use chrono::Utc;

use crate::error::AppResult;
use crate::models::PrizeResponse;
use crate::services::PrizePool;
use crate::store::PrizeStore;

/// 奖品查询服务（面向展示层）
#[derive(Clone)]
pub struct PrizeService {
    store: Arc<dyn PrizeStore>,
}

impl PrizeService {
    pub fn new(store: Arc<dyn PrizeStore>) -> Self {
        Self { store }
    }

    /// 获取当前可参与的奖品列表。
    /// 与抽奖走同一条奖池加载路径，坏记录同样被剔除。
    pub async fn list_prizes(&self) -> AppResult<Vec<PrizeResponse>> {
        let pool = PrizePool::load(self.store.as_ref(), Utc::now()).await?;
        Ok(pool.into_records().into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::prize_entity as prizes;
    use crate::store::memory::MemoryPrizeStore;
    use chrono::Duration;

    fn prize(id: i64, quantity: Option<i64>) -> prizes::Model {
        let now = Utc::now();
        prizes::Model {
            id,
            title: format!("Prize {id}"),
            thumbnail_url: Some(format!("https://cdn.example.com/prize-{id}.png")),
            content: None,
            start_time: now - Duration::days(1),
            end_time: now + Duration::days(30),
            quantity_remaining: quantity,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_lists_valid_prizes_in_store_order() {
        let store = MemoryPrizeStore::new(vec![prize(1, Some(5)), prize(2, None), prize(3, Some(0))]);
        let svc = PrizeService::new(Arc::new(store));
        let list = svc.list_prizes().await.unwrap();
        // 配置缺失的记录被剔除，零库存的保留（前端展示为已抽完）
        let ids: Vec<i64> = list.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list[0].quantity_remaining, Some(5));
    }
}

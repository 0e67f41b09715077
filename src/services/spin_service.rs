use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::SpinResponse;
use crate::services::{PrizePool, SpinEngine};
use crate::store::PrizeStore;

/// 同一奖品连续竞争扣减失败的重试上限
const MAX_AWARD_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct SpinService {
    store: Arc<dyn PrizeStore>,
    engine: SpinEngine,
}

impl SpinService {
    pub fn new(store: Arc<dyn PrizeStore>, engine: SpinEngine) -> Self {
        Self { store, engine }
    }

    /// 抽奖 (Spin)
    ///
    /// 逻辑:
    /// 1. 从内容库拉取奖池快照（坏记录剔除并告警）
    /// 2. 库存耗尽 → 无条件未中奖，不再抽随机数
    /// 3. u1 与全局中奖率比较决定中奖与否
    /// 4. 中奖后按 库存×时间权重 做轮盘选择
    /// 5. 通过内容库条件扣减锁定库存，竞争失败换奖品重试
    pub async fn spin(&self) -> AppResult<SpinResponse> {
        let now = Utc::now();
        let pool = PrizePool::load(self.store.as_ref(), now).await?;
        match self.resolve(pool, now).await? {
            Some(prize) => {
                log::info!("Spin won prize {} ({})", prize.id, prize.title);
                Ok(SpinResponse::win(prize))
            }
            None => Ok(SpinResponse::no_win()),
        }
    }

    /// 对给定快照完成一次完整决策，返回中奖记录（未中奖为 None）
    async fn resolve(
        &self,
        pool: PrizePool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<prizes::Model>> {
        if !pool.has_remaining_prizes() {
            log::debug!("Spin resolved to no-win: pool drained");
            return Ok(None);
        }

        let u1: f64 = rand::rng().random();
        if !self.engine.is_win(&pool, now, u1) {
            let global_rate = self.engine.global_win_rate(&pool, now);
            log::debug!("Spin resolved to no-win: draw {u1:.4} above global rate {global_rate:.4}");
            return Ok(None);
        }

        self.award(pool, now).await
    }

    /// 轮盘选择 + 条件扣减。
    ///
    /// 扣减失败说明该奖品库存恰好被并发抽空：将其移出工作集换一个重试；
    /// 工作集清空则本次判未中奖（竞争中被抽干的奖池不派奖）。
    async fn award(
        &self,
        pool: PrizePool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<prizes::Model>> {
        let mut working: Vec<prizes::Model> = pool
            .into_records()
            .into_iter()
            .filter(|p| p.is_available())
            .collect();

        let mut attempts = 0;
        while !working.is_empty() {
            if attempts >= MAX_AWARD_ATTEMPTS {
                return Err(AppError::InternalError(
                    "Failed to secure a prize after repeated stock races".into(),
                ));
            }
            attempts += 1;

            let u2: f64 = rand::rng().random();
            let Some(index) = self.engine.pick_prize_index(&working, now, u2) else {
                break;
            };

            let chosen_id = working[index].id;
            if self.store.decrement_quantity(chosen_id).await? {
                let mut won = working.swap_remove(index);
                // 返回给调用方的快照同步扣掉这一份
                won.quantity_remaining = Some(won.quantity() - 1);
                return Ok(Some(won));
            }

            // 扣减失败 - 库存已为 0，剔除该奖品后重试
            log::debug!("Prize {chosen_id} lost a stock race, retrying over remaining prizes");
            working.remove(index);
        }

        log::debug!("Spin resolved to no-win: all candidate prizes raced to zero");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryPrizeStore;
    use async_trait::async_trait;
    use chrono::Duration;
    use sea_orm::DbErr;

    fn prize(id: i64, quantity: i64) -> prizes::Model {
        let now = Utc::now();
        prizes::Model {
            id,
            title: format!("Prize {id}"),
            thumbnail_url: None,
            content: None,
            start_time: now - Duration::days(10),
            end_time: now + Duration::days(10),
            quantity_remaining: Some(quantity),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn service(store: MemoryPrizeStore, base: f64) -> SpinService {
        SpinService::new(Arc::new(store), SpinEngine::new(base).unwrap())
    }

    #[tokio::test]
    async fn test_guaranteed_win_awards_and_decrements_exactly_one() {
        let store = MemoryPrizeStore::new(vec![prize(1, 3), prize(2, 3)]);
        let svc = service(store.clone(), 1.0);

        let response = svc.spin().await.unwrap();
        assert!(response.won);
        let won = response.prize.unwrap();

        let q1 = store.quantity_of(1).await.unwrap();
        let q2 = store.quantity_of(2).await.unwrap();
        assert_eq!(q1 + q2, 5, "exactly one unit consumed");
        if won.id == 1 {
            assert_eq!((q1, q2), (2, 3));
        } else {
            assert_eq!((q1, q2), (3, 2));
        }
    }

    #[tokio::test]
    async fn test_drained_pool_never_pays_out() {
        let store = MemoryPrizeStore::new(vec![prize(1, 0), prize(2, 0)]);
        let svc = service(store, 1.0);
        for _ in 0..1000 {
            let response = svc.spin().await.unwrap();
            assert!(!response.won);
            assert!(response.prize.is_none());
        }
    }

    #[tokio::test]
    async fn test_zero_base_rate_at_window_start_never_wins() {
        // 窗口当天刚开始，紧迫度为 0，base 0 下全局中奖率为 0
        let mut fresh = prize(1, 5);
        fresh.start_time = Utc::now()
            .date_naive()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();
        fresh.end_time = fresh.start_time + Duration::days(30);
        let store = MemoryPrizeStore::new(vec![fresh]);
        let svc = service(store.clone(), 0.0);
        for _ in 0..50 {
            let response = svc.spin().await.unwrap();
            assert!(!response.won);
        }
        assert_eq!(store.quantity_of(1).await, Some(5));
    }

    #[tokio::test]
    async fn test_malformed_records_excluded_spin_still_works() {
        let mut bad = prize(2, 5);
        bad.quantity_remaining = None;
        let mut inverted = prize(3, 5);
        inverted.end_time = inverted.start_time - Duration::days(1);
        let store = MemoryPrizeStore::new(vec![prize(1, 5), bad, inverted]);

        let svc = service(store.clone(), 1.0);
        let response = svc.spin().await.unwrap();
        assert!(response.won);
        assert_eq!(response.prize.unwrap().id, 1);
        assert_eq!(store.quantity_of(1).await, Some(4));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_spins_drain_to_exactly_zero() {
        let n: i64 = 16;
        let store = MemoryPrizeStore::new(vec![prize(1, n)]);
        let svc = service(store.clone(), 1.0);

        let mut handles = Vec::new();
        for _ in 0..n {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move { svc.spin().await }));
        }

        let mut wins = 0;
        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            if response.won {
                wins += 1;
            }
        }

        assert_eq!(wins, n, "every guaranteed-win spin must award while stock lasts");
        assert_eq!(store.quantity_of(1).await, Some(0));

        // 库存抽干后继续抽必然未中奖
        let response = svc.spin().await.unwrap();
        assert!(!response.won);
        assert_eq!(store.quantity_of(1).await, Some(0), "never goes negative");
    }

    struct FailingStore;

    #[async_trait]
    impl PrizeStore for FailingStore {
        async fn fetch_active_prizes(
            &self,
            _now: DateTime<Utc>,
        ) -> AppResult<Vec<prizes::Model>> {
            Err(DbErr::Custom("connection refused".into()).into())
        }

        async fn decrement_quantity(&self, _prize_id: i64) -> AppResult<bool> {
            Err(DbErr::Custom("connection refused".into()).into())
        }
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_error_not_no_win() {
        let svc = SpinService::new(Arc::new(FailingStore), SpinEngine::new(0.5).unwrap());
        let result = svc.spin().await;
        assert!(matches!(result, Err(AppError::StoreError(_))));
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, UpdateResult,
};

use crate::entities::prize_entity as prizes;
use crate::error::AppResult;

/// 内容库访问边界
///
/// 抽奖核心只通过这两个操作接触奖品数据：按固定顺序读一份快照，
/// 以及对单个奖品做一次条件扣减。扣减必须是原子的，
/// 并发抽奖下同一库存只能被扣走一次。
#[async_trait]
pub trait PrizeStore: Send + Sync {
    /// 拉取当前可参与的奖品（启用且窗口已开始），顺序固定
    async fn fetch_active_prizes(&self, now: DateTime<Utc>) -> AppResult<Vec<prizes::Model>>;

    /// 条件扣减库存：仅当剩余库存 > 0 时减一，返回是否扣减成功。
    /// 失败表示库存已被并发清空，调用方应换一个奖品重试。
    async fn decrement_quantity(&self, prize_id: i64) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct SeaOrmPrizeStore {
    pool: DatabaseConnection,
}

impl SeaOrmPrizeStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrizeStore for SeaOrmPrizeStore {
    async fn fetch_active_prizes(&self, now: DateTime<Utc>) -> AppResult<Vec<prizes::Model>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .filter(prizes::Column::StartTime.lte(now))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }

    async fn decrement_quantity(&self, prize_id: i64) -> AppResult<bool> {
        // 原子扣减 (update where quantity_remaining > 0)，
        // rows_affected == 0 说明库存已被并发抽空
        let update_result: UpdateResult = prizes::Entity::update_many()
            .col_expr(
                prizes::Column::QuantityRemaining,
                Expr::col(prizes::Column::QuantityRemaining).sub(1),
            )
            .col_expr(prizes::Column::UpdatedAt, Expr::cust("NOW()"))
            .filter(prizes::Column::Id.eq(prize_id))
            .filter(
                Condition::all()
                    .add(prizes::Column::QuantityRemaining.is_not_null())
                    .add(prizes::Column::QuantityRemaining.gt(0)),
            )
            .exec(&self.pool)
            .await?;

        Ok(update_result.rows_affected == 1)
    }
}

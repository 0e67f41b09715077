use chrono::{DateTime, Duration, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 转盘奖品实体
/// 概念说明:
/// - start_time / end_time: 活动窗口，窗口越接近结束全局中奖率越高
/// - quantity_remaining: 剩余库存 (NULL 表示配置缺失，加载奖池时剔除)
/// - is_active: 运营开关，关闭后不进入奖池
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 奖品标题 (唯一)
    pub title: String,
    /// 缩略图地址
    pub thumbnail_url: Option<String>,
    /// 奖品描述
    pub content: Option<String>,
    /// 窗口开始时间
    pub start_time: DateTime<Utc>,
    /// 窗口结束时间 (必须晚于开始时间)
    pub end_time: DateTime<Utc>,
    /// 剩余库存 (NULL=配置缺失)
    pub quantity_remaining: Option<i64>,
    /// 是否启用
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 时间差一律先把 "now" 截断到当天零点 (UTC) 再计算，窗口粒度为天
fn day_floor(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

impl Model {
    /// 剩余库存，未通过校验的记录不应调用 (NULL 按 0 处理)
    pub fn quantity(&self) -> i64 {
        self.quantity_remaining.unwrap_or(0)
    }

    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.quantity() > 0
    }

    /// 窗口总时长
    pub fn total_duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// 窗口剩余时长，过期后为 0
    pub fn remaining_duration(&self, now: DateTime<Utc>) -> Duration {
        (self.end_time - day_floor(now)).max(Duration::zero())
    }

    /// 窗口已经过时长，夹在 [0, total_duration] 之间
    pub fn elapsed_duration(&self, now: DateTime<Utc>) -> Duration {
        let total = self.total_duration().max(Duration::zero());
        (day_floor(now) - self.start_time).clamp(Duration::zero(), total)
    }

    /// 记录级校验：窗口倒置或库存缺失的记录不能进入奖池
    pub fn validate(&self) -> Result<(), AppError> {
        if self.total_duration() <= Duration::zero() {
            return Err(AppError::DataError(format!(
                "prize {} has an inverted or empty window ({} >= {})",
                self.id, self.start_time, self.end_time
            )));
        }
        match self.quantity_remaining {
            None => Err(AppError::DataError(format!(
                "prize {} is missing its remaining quantity",
                self.id
            ))),
            Some(q) if q < 0 => Err(AppError::DataError(format!(
                "prize {} has a negative remaining quantity ({q})",
                self.id
            ))),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

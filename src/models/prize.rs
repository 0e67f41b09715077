use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 奖品展示信息（前端转盘渲染用）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    /// 奖品ID
    pub id: i64,
    /// 奖品标题
    pub title: String,
    /// 缩略图地址
    pub thumbnail_url: Option<String>,
    /// 奖品描述
    pub content: Option<String>,
    /// 窗口开始时间
    pub start_time: DateTime<Utc>,
    /// 窗口结束时间
    pub end_time: DateTime<Utc>,
    /// 剩余库存
    pub quantity_remaining: Option<i64>,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            title: m.title,
            thumbnail_url: m.thumbnail_url,
            content: m.content,
            start_time: m.start_time,
            end_time: m.end_time,
            quantity_remaining: m.quantity_remaining,
        }
    }
}

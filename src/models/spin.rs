use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 中奖奖品（对外隐藏窗口与库存细节）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WonPrizeResponse {
    /// 奖品ID
    pub id: i64,
    /// 奖品标题
    pub title: String,
    /// 缩略图地址
    pub thumbnail_url: Option<String>,
    /// 奖品描述
    pub content: Option<String>,
}

impl From<prize_entity::Model> for WonPrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        WonPrizeResponse {
            id: m.id,
            title: m.title,
            thumbnail_url: m.thumbnail_url,
            content: m.content,
        }
    }
}

/// 抽奖（Spin）响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResponse {
    /// 是否中奖
    pub won: bool,
    /// 中奖奖品（未中奖为 null）
    pub prize: Option<WonPrizeResponse>,
}

impl SpinResponse {
    pub fn win(prize: prize_entity::Model) -> Self {
        Self {
            won: true,
            prize: Some(prize.into()),
        }
    }

    pub fn no_win() -> Self {
        Self {
            won: false,
            prize: None,
        }
    }
}

use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::{ApiResponse, PrizeResponse};
use crate::services::PrizeService;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PrizeResponse]),
        (status = 503, description = "内容库不可用")
    )
)]
/// 获取当前可参与的奖品列表（转盘渲染用）
/// 配置坏掉的奖品不会出现在列表里
pub async fn get_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_prizes().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/prizes", web::get().to(get_prizes));
}

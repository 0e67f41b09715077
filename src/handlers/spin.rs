use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::{ApiResponse, SpinResponse};
use crate::services::SpinService;

#[utoipa::path(
    post,
    path = "/spin",
    tag = "spin",
    responses(
        (status = 200, description = "抽奖完成（won=false 表示未中奖）", body = SpinResponse),
        (status = 503, description = "内容库不可用")
    )
)]
/// 进行一次抽奖:
/// 1. 库存耗尽直接未中奖
/// 2. 按全局中奖率决定是否中奖（窗口临近结束中奖率上升）
/// 3. 中奖后按 库存×时间权重 轮盘选择奖品并原子扣减库存
pub async fn spin(service: web::Data<SpinService>) -> Result<HttpResponse> {
    match service.spin().await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn spin_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/spin", web::post().to(spin));
}

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::prizes::get_prizes,
        handlers::spin::spin,
    ),
    components(
        schemas(
            PrizeResponse,
            SpinResponse,
            WonPrizeResponse,
            ApiError,
        )
    ),
    tags(
        (name = "prizes", description = "奖品查询"),
        (name = "spin", description = "转盘抽奖")
    ),
    info(
        title = "Spinwheel Backend API",
        description = "时间衰减限量奖池的转盘抽奖服务",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

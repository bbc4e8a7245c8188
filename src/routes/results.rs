use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{ResultListParams, SubmitMarksRequest};
use crate::services::ResultService;

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn submit_marks(
    req: HttpRequest,
    body: web::Json<SubmitMarksRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.submit_marks(&req, body.into_inner()).await
}

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultListParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/result")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_results))
            .route("/marks", web::post().to(submit_marks)),
    );
}

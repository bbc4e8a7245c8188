use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{CreateExamRequest, ExamListParams};
use crate::services::ExamService;
use crate::utils::{CurrentUser, SafeIDI64};

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

// 列出考试
pub async fn list_exams(
    req: HttpRequest,
    user: CurrentUser,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .list_exams(&req, &user, query.into_inner())
        .await
}

// 创建考试
pub async fn create_exam(
    req: HttpRequest,
    user: CurrentUser,
    body: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_exam(&req, &user, body.into_inner())
        .await
}

// 获取考试详情
pub async fn get_exam(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, path.0).await
}

// 更新考试，请求体在出卷人校验之后解析
pub async fn update_exam(
    req: HttpRequest,
    user: CurrentUser,
    path: SafeIDI64,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.update_exam(&req, &user, path.0, &body).await
}

// 删除考试
pub async fn delete_exam(
    req: HttpRequest,
    user: CurrentUser,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, &user, path.0).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(web::post().to(create_exam)),
            )
            .service(
                web::resource("/{id}")
                    // 所有登录用户可查看，修改和删除在业务层校验出卷人
                    .route(web::get().to(get_exam))
                    .route(web::put().to(update_exam))
                    .route(web::delete().to(delete_exam)),
            ),
    );
}

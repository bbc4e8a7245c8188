//! 业务服务层
//!
//! 每个领域一个 `XxxService`，每个操作一个文件。服务从 app data 中取存储和缓存，
//! 直接返回 HTTP 响应；存储层错误只记日志，对外统一为 500。

pub mod attendance;
pub mod auth;
pub mod exams;
pub mod results;
pub mod students;
pub mod subjects;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use exams::ExamService;
pub use results::ResultService;
pub use students::StudentService;
pub use subjects::SubjectService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use std::fmt::Display;
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::middlewares::{create_error_response, error_response_error};
use crate::models::{ApiError, ErrorCode};
use crate::storage::Storage;

/// 从 app data 中取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            error_response_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Server error",
            )
        })
}

/// 从 app data 中取对象缓存
pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 记录错误并返回通用 500
pub(crate) fn server_error(context: &str, err: impl Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiError::server_error())
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    create_error_response(StatusCode::BAD_REQUEST, code, message)
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    create_error_response(StatusCode::NOT_FOUND, code, message)
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    create_error_response(StatusCode::FORBIDDEN, ErrorCode::Forbidden, message)
}

pub(crate) fn unauthorized(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    create_error_response(StatusCode::UNAUTHORIZED, code, message)
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    create_error_response(StatusCode::CONFLICT, code, message)
}

/// 服务测试用的请求与响应辅助
#[cfg(test)]
pub(crate) mod test_helpers {
    use actix_web::{HttpRequest, HttpResponse, body::to_bytes, test::TestRequest, web};
    use std::sync::Arc;

    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaObjectCache;
    use crate::storage::Storage;

    pub fn request_with(storage: Arc<dyn Storage>) -> HttpRequest {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::new().unwrap());
        TestRequest::default()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(cache))
            .to_http_request()
    }

    pub async fn json_body(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

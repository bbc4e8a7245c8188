//! HTTP 中间件与统一错误响应

pub mod rate_limit;
pub mod require_jwt;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, error::InternalError, http::StatusCode};

use crate::models::{ApiError, ErrorCode};

/// 构造统一格式的错误响应 `{success: false, error, code}`
pub fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiError::new(code, message))
}

/// 同上，包装为 actix 错误（用于提取器和参数错误处理器）
pub fn error_response_error(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> actix_web::Error {
    let message = message.into();
    let response = create_error_response(status, code, message.clone());
    InternalError::from_response(message, response).into()
}

use actix_web::{
    HttpRequest,
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
};
use tracing::debug;

use crate::middlewares::error_response_error;
use crate::models::ErrorCode;

/// JSON 请求体解析失败统一返回 400 InvalidPayload
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON payload on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Payload too large".to_string()
        }
        _ => format!("Invalid payload: {err}"),
    };
    error_response_error(StatusCode::BAD_REQUEST, ErrorCode::InvalidPayload, message)
}

/// 查询参数解析失败统一返回 400 InvalidPayload
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query on {}: {}", req.path(), err);
    error_response_error(
        StatusCode::BAD_REQUEST,
        ErrorCode::InvalidPayload,
        format!("Invalid query: {err}"),
    )
}

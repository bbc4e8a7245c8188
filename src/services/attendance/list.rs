use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::ErrorCode;
use crate::models::attendance::{
    requests::AttendanceListParams, responses::AttendanceListResponse,
};
use crate::services::{bad_request, server_error};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    params: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.list_attendance(query).await {
        Ok(attendance) => Ok(HttpResponse::Ok().json(AttendanceListResponse {
            success: true,
            attendance,
        })),
        Err(e) => Ok(server_error("Failed to list attendance", e)),
    }
}

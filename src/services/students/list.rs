use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ErrorCode;
use crate::models::students::requests::StudentListParams;
use crate::services::{bad_request, server_error};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(server_error("Failed to list students", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::errors::CampusError;
use crate::models::ErrorCode;
use crate::models::attendance::{
    requests::MarkAttendanceRequest, responses::MarkAttendanceResponse,
};
use crate::models::users::entities::User;
use crate::services::{bad_request, server_error};

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    actor: &User,
    payload: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let batch = match payload.validate(actor.display_label()) {
        Ok(batch) => batch,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    let (subject_code, date) = (batch.subject_code.clone(), batch.date.clone());

    match storage.mark_attendance(batch).await {
        Ok(saved) => {
            info!(
                "User {} saved {} attendance records for {} on {}",
                actor.id, saved, subject_code, date
            );
            Ok(HttpResponse::Ok().json(MarkAttendanceResponse {
                success: true,
                saved,
            }))
        }
        // 引用了不存在的学生
        Err(CampusError::Validation(msg)) => Ok(bad_request(ErrorCode::InvalidPayload, msg)),
        Err(e) => Ok(server_error("Failed to save attendance", e)),
    }
}

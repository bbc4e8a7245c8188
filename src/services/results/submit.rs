use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, info};

use super::ResultService;
use crate::models::ErrorCode;
use crate::models::results::{
    entities::MarksOutcome, requests::SubmitMarksRequest, responses::SubmitMarksResponse,
};
use crate::services::{bad_request, server_error};

pub async fn submit_marks(
    service: &ResultService,
    request: &HttpRequest,
    payload: SubmitMarksRequest,
) -> ActixResult<HttpResponse> {
    // 校验失败时不写库
    let submission = match payload.validate() {
        Ok(submission) => submission,
        Err(msg) => {
            debug!("Rejected marks payload: {}", msg);
            return Ok(bad_request(ErrorCode::InvalidPayload, "Invalid payload"));
        }
    };

    let storage = service.get_storage(request)?;
    let batch = submission.batch.clone();

    match storage.submit_marks(submission).await {
        Ok(outcome) => {
            match outcome {
                MarksOutcome::Created(n) => info!(
                    "Created {} results for exam {} ({}/{})",
                    n, batch.exam_id, batch.sem, batch.batch_code
                ),
                MarksOutcome::Updated(n) => info!(
                    "Updated {} results for exam {} ({}/{})",
                    n, batch.exam_id, batch.sem, batch.batch_code
                ),
            }
            Ok(HttpResponse::Ok().json(SubmitMarksResponse::from(outcome)))
        }
        Err(e) => Ok(server_error("Failed to submit marks", e)),
    }
}

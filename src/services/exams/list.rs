use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::ExamListParams;
use crate::models::users::entities::User;
use crate::services::server_error;

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    actor: &User,
    params: ExamListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_exams_with_pagination(params.into_query(actor.id))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(server_error("Failed to list exams", e)),
    }
}

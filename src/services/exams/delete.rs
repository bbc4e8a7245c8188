use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::users::entities::User;
use crate::models::{ErrorCode, MessageResponse};
use crate::services::{forbidden, not_found, server_error};

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    actor: &User,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => return Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => return Ok(server_error("Failed to load exam", e)),
    };

    if !exam.is_owned_by(actor.id) {
        return Ok(forbidden("Only the paper setter can delete this exam"));
    }

    match storage.delete_exam(exam_id).await {
        Ok(true) => {
            info!("Exam {} deleted by user {}", exam_id, actor.id);
            Ok(HttpResponse::Ok().json(MessageResponse::new("Exam deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Ok(server_error("Failed to delete exam", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::exams::fixture::exam_fixture;
    use crate::services::test_helpers::json_body;
    use crate::storage::test_support::as_dyn;
    use actix_web::{http::StatusCode, test::TestRequest};

    #[actix_web::test]
    async fn test_non_owner_cannot_delete() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service.delete_exam(&request, &f.other, f.exam.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(f.storage.get_exam_by_id_impl(f.exam.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_owner_deletes() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service.delete_exam(&request, &f.owner, f.exam.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Exam deleted successfully");

        let again = service.delete_exam(&request, &f.owner, f.exam.id).await.unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }
}

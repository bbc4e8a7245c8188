use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::ErrorCode;
use crate::services::{not_found, server_error};

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_exam_detail(exam_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(detail)),
        Ok(None) => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Ok(server_error("Failed to load exam", e)),
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
    async fn test_detail_populates_setter() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service.get_exam(&request, f.exam.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], f.exam.id);
        assert_eq!(body["setter"]["username"], "prof_rao");
        assert_eq!(body["setter"]["email"], "prof_rao@campus.local");
    }

    #[actix_web::test]
    async fn test_missing_exam_is_not_found() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service.get_exam(&request, f.exam.id + 50).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], ErrorCode::ExamNotFound as i32);
    }
}

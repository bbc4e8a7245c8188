use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::ErrorCode;
use crate::models::exams::requests::UpdateExamRequest;
use crate::models::users::entities::User;
use crate::services::{bad_request, forbidden, not_found, server_error};
use crate::utils::semester::normalize_semester;

/// 请求体在出卷人校验通过后才解析，非出卷人一律得到 403
pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    actor: &User,
    exam_id: i64,
    body: &[u8],
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => return Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => return Ok(server_error("Failed to load exam", e)),
    };

    // 管理员也不能绕过
    if !exam.is_owned_by(actor.id) {
        info!("User {} tried to update exam {} owned by {}", actor.id, exam.id, exam.paper_setter);
        return Ok(forbidden("Only the paper setter can modify this exam"));
    }

    let mut update = match serde_json::from_slice::<UpdateExamRequest>(body) {
        Ok(update) => update,
        Err(e) => {
            return Ok(bad_request(
                ErrorCode::InvalidPayload,
                format!("Invalid payload: {e}"),
            ));
        }
    };
    if let Err(msg) = update.validate() {
        return Ok(bad_request(ErrorCode::InvalidPayload, msg));
    }
    update.sem = update.sem.as_deref().and_then(normalize_semester);
    update.subject_code = update.subject_code.map(|code| code.trim().to_uppercase());

    if let Err(e) = storage.update_exam(exam_id, update).await {
        return Ok(server_error("Failed to update exam", e));
    }

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

    fn rename(name: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({ "name": name })).unwrap()
    }

    #[actix_web::test]
    async fn test_owner_can_update() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service
            .update_exam(&request, &f.owner, f.exam.id, &rename("Mid Term 2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Mid Term 2");
        assert_eq!(body["setter"]["id"], f.owner.id);
    }

    #[actix_web::test]
    async fn test_non_owner_is_forbidden_and_exam_unchanged() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        for actor in [&f.other, &f.admin] {
            let response = service
                .update_exam(&request, actor, f.exam.id, &rename("Hijacked"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }

        // 请求体无法解析时仍然先返回 403
        let response = service
            .update_exam(&request, &f.other, f.exam.id, br#"{"name": "#)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let stored = f.storage.get_exam_by_id_impl(f.exam.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Mid Term 1");
    }

    #[actix_web::test]
    async fn test_missing_exam_and_bad_payload() {
        let f = exam_fixture().await;
        let service = ExamService::with_storage(as_dyn(&f.storage));
        let request = TestRequest::default().to_http_request();

        let response = service
            .update_exam(&request, &f.owner, f.exam.id + 9, &rename("x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = service
            .update_exam(&request, &f.owner, f.exam.id, &rename("   "))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = service
            .update_exam(&request, &f.owner, f.exam.id, br#"{"maxMarks": "lots"}"#)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["code"],
            ErrorCode::InvalidPayload as i32
        );
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::{requests::SubjectListParams, responses::SubjectListResponse};
use crate::models::ErrorCode;
use crate::services::{bad_request, server_error};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    params: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.list_subjects(query).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(SubjectListResponse { subjects })),
        Err(e) => Ok(server_error("Failed to list subjects", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{as_dyn, memory_storage, seed_subject};
    use actix_web::{http::StatusCode, test::TestRequest};

    #[actix_web::test]
    async fn test_unknown_semester_is_bad_request() {
        let storage = memory_storage().await;
        seed_subject(&storage, "Compilers", "CSE302", "CSE", 3).await;
        let service = SubjectService::with_storage(as_dyn(&storage));
        let request = TestRequest::default().to_http_request();

        let response = service
            .list_subjects(
                &request,
                SubjectListParams {
                    branch: Some("CSE".to_string()),
                    semester: Some("foo".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

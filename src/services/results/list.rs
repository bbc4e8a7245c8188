use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::ErrorCode;
use crate::models::results::{requests::ResultListParams, responses::ResultListResponse};
use crate::services::{bad_request, server_error};

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
    params: ResultListParams,
) -> ActixResult<HttpResponse> {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.list_results(query).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ResultListResponse {
            success: true,
            results,
        })),
        Err(e) => Ok(server_error("Failed to list results", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{as_dyn, memory_storage};
    use actix_web::{http::StatusCode, test::TestRequest};

    #[actix_web::test]
    async fn test_missing_batch_keys_are_rejected() {
        let storage = memory_storage().await;
        let service = ResultService::with_storage(as_dyn(&storage));
        let request = TestRequest::default().to_http_request();

        let response = service
            .list_results(
                &request,
                ResultListParams {
                    exam: Some(1),
                    sem: Some("sem1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::ErrorCode;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::users::entities::{User, UserStatus};
use crate::services::{server_error, unauthorized};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn expired_session() -> HttpResponse {
    // 清除无效的 refresh token cookie
    let mut response = unauthorized(
        ErrorCode::Unauthorized,
        "Login expired or invalid, please login again",
    );
    let _ = response.add_cookie(&JwtUtils::create_empty_refresh_token_cookie());
    response
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(expired_session());
        }
    };

    // 重新读取用户，角色或状态变化立即生效
    let Some(user_id) = claims.user_id() else {
        return Ok(expired_session());
    };
    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => return Ok(expired_session()),
        Err(e) => return Ok(server_error("Refresh user lookup failed", e)),
    };

    match JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(RefreshTokenResponse {
            access_token,
            expires_in: JwtUtils::access_token_ttl_seconds(),
        })),
        Err(e) => Ok(server_error("Failed to generate access token", e)),
    }
}

pub async fn handle_get_user(user: User) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserInfoResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::json_body;
    use crate::storage::test_support::{as_dyn, memory_storage, seed_user};
    use crate::utils::jwt::REFRESH_TOKEN_COOKIE;
    use actix_web::{cookie::Cookie, http::StatusCode, test::TestRequest, web};

    #[actix_web::test]
    async fn test_refresh_issues_new_access_token() {
        let storage = memory_storage().await;
        let user = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let pair = user.generate_token_pair(None).unwrap();

        let request = TestRequest::default()
            .app_data(web::Data::new(as_dyn(&storage)))
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, pair.refresh_token))
            .to_http_request();

        let response = AuthService::new_lazy().refresh_token(&request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let claims = JwtUtils::verify_access_token(body["accessToken"].as_str().unwrap()).unwrap();
        assert_eq!(claims.user_id(), Some(user.id));
    }

    #[actix_web::test]
    async fn test_access_token_cannot_refresh() {
        let storage = memory_storage().await;
        let user = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let pair = user.generate_token_pair(None).unwrap();

        let request = TestRequest::default()
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, pair.access_token))
            .to_http_request();

        let response = AuthService::with_storage(as_dyn(&storage))
            .refresh_token(&request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_unauthorized() {
        let request = TestRequest::default().to_http_request();
        let storage = memory_storage().await;
        let response = AuthService::with_storage(as_dyn(&storage))
            .refresh_token(&request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::cache::CacheResult;
use crate::models::{
    ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::{User, UserStatus},
};
use crate::services::{cache_from_request, server_error, unauthorized};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::{AuthService, otp_cache_key};

const BAD_CREDENTIALS: &str = "Username or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 根据用户名或邮箱获取用户并校验密码
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) if verify_password(&login_request.password, &user.password_hash) => user,
        Ok(_) => return Ok(unauthorized(ErrorCode::AuthFailed, BAD_CREDENTIALS)),
        Err(e) => return Ok(server_error("Login lookup failed", e)),
    };

    if user.status != UserStatus::Active {
        return Ok(unauthorized(ErrorCode::AuthFailed, "Account is not active"));
    }

    // 2. 管理员二次验证
    if user.role.requires_otp()
        && let Some(rejection) = check_otp(&user, login_request.otp.as_deref(), request).await
    {
        return Ok(rejection);
    }

    // 3. 更新最后登录时间，失败不影响登录
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    let refresh_ttl = JwtUtils::refresh_token_ttl(login_request.remember_me);
    let token_pair = match user.generate_token_pair(Some(refresh_ttl)) {
        Ok(pair) => pair,
        Err(e) => return Ok(server_error("Failed to generate JWT token", e)),
    };

    info!("User {} logged in successfully", user.username);

    let refresh_cookie =
        JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_ttl);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: JwtUtils::access_token_ttl_seconds(),
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().cookie(refresh_cookie).json(response))
}

/// 校验并消费验证码，通过时返回 None
async fn check_otp(user: &User, otp: Option<&str>, request: &HttpRequest) -> Option<HttpResponse> {
    let Some(otp) = otp.map(str::trim).filter(|otp| !otp.is_empty()) else {
        return Some(unauthorized(ErrorCode::OtpRequired, "OTP required"));
    };

    let Some(cache) = cache_from_request(request) else {
        return Some(server_error("OTP check failed", "object cache not configured"));
    };

    let key = otp_cache_key(user.id);
    match cache.get_raw(&key).await {
        CacheResult::Found(expected) if expected == otp => {
            cache.remove(&key).await;
            None
        }
        _ => {
            info!("Invalid OTP for user {}", user.id);
            Some(unauthorized(ErrorCode::OtpInvalid, "Invalid or expired OTP"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::models::auth::LoginRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{json_body, request_with};
    use crate::storage::test_support::{as_dyn, memory_storage, seed_user};
    use actix_web::{http::StatusCode, web};
    use std::sync::Arc;

    fn login_request(username: &str, password: &str, otp: Option<&str>) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            otp: otp.map(str::to_string),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_teacher_login_issues_tokens() {
        let storage = memory_storage().await;
        seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let request = request_with(as_dyn(&storage));
        let service = AuthService::new_lazy();

        let response = service
            .login(login_request("prof_rao", "Campus#2025", None), &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .cookies()
                .any(|c| c.name() == crate::utils::jwt::REFRESH_TOKEN_COOKIE)
        );

        let body = json_body(response).await;
        let token = body["accessToken"].as_str().unwrap();
        let claims = JwtUtils::verify_access_token(token).unwrap();
        assert_eq!(claims.role, "teacher");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_wrong_password_is_rejected() {
        let storage = memory_storage().await;
        seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let request = request_with(as_dyn(&storage));

        let response = AuthService::new_lazy()
            .login(login_request("prof_rao", "wrong", None), &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["code"], ErrorCode::AuthFailed as i32);
    }

    #[actix_web::test]
    async fn test_admin_without_otp_is_asked_for_one() {
        let storage = memory_storage().await;
        seed_user(&storage, "root", UserRole::Admin).await;
        let request = request_with(as_dyn(&storage));

        let response = AuthService::new_lazy()
            .login(login_request("root", "Campus#2025", None), &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "OTP required");
        assert_eq!(body["code"], ErrorCode::OtpRequired as i32);
    }

    #[actix_web::test]
    async fn test_admin_otp_is_single_use() {
        let storage = memory_storage().await;
        let admin = seed_user(&storage, "root", UserRole::Admin).await;
        let request = request_with(as_dyn(&storage));
        let cache = request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .unwrap()
            .get_ref()
            .clone();
        cache
            .insert_raw(otp_cache_key(admin.id), "482913".to_string(), 60)
            .await;

        let service = AuthService::new_lazy();
        let wrong = service
            .login(login_request("root", "Campus#2025", Some("000000")), &request)
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(wrong).await["code"], ErrorCode::OtpInvalid as i32);

        let ok = service
            .login(login_request("root", "Campus#2025", Some("482913")), &request)
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let reused = service
            .login(login_request("root", "Campus#2025", Some("482913")), &request)
            .await
            .unwrap();
        assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
    }
}

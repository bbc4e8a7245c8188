pub mod login;
pub mod logout;
pub mod otp;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::requests::{LoginRequest, SendOtpRequest};
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 管理员验证码缓存键
pub(crate) fn otp_cache_key(user_id: i64) -> String {
    format!("otp:{user_id}")
}

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证（管理员需要验证码）
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 发送管理员验证码
    pub async fn send_otp(
        &self,
        otp_request: SendOtpRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        otp::handle_send_otp(self, otp_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }

    // 当前用户信息
    pub async fn me(&self, user: User) -> ActixResult<HttpResponse> {
        token::handle_get_user(user).await
    }
}

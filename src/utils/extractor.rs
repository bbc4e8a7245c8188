//! 请求提取器
//!
//! 路径 ID 解析失败直接按资源不存在处理；当前用户从 RequireJWT 写入的扩展中读取。

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, http::StatusCode};
use futures_util::future::{Ready, ready};

use crate::middlewares::error_response_error;
use crate::models::ErrorCode;
use crate::models::users::entities::User;

/// 路径中的 i64 ID，非法值返回 404
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => Err(error_response_error(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                "Resource not found",
            )),
        })
    }
}

/// 当前登录用户，没有会话时返回 401
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.extensions().get::<User>() {
            Some(user) => Ok(CurrentUser(user.clone())),
            None => Err(error_response_error(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Unauthorized",
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_non_numeric_id_is_not_found() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "abc")
            .to_http_parts();
        let err = SafeIDI64::from_request(&req, &mut payload).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::NOT_FOUND);

        let (req, mut payload) = TestRequest::default().param("id", "12").to_http_parts();
        let id = SafeIDI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 12);
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let (req, mut payload) = TestRequest::default().to_http_parts();
        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}

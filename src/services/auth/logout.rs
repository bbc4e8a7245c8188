use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, session_cache_key};
use crate::models::MessageResponse;
use crate::services::cache_from_request;
use crate::utils::jwt::JwtUtils;

/// 处理用户登出
///
/// 丢弃当前 token 的会话缓存，并用空 cookie 清除客户端的 refresh token
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let (Some(token), Some(cache)) = (bearer_token(request), cache_from_request(request)) {
        cache.remove(&session_cache_key(&token)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(MessageResponse::new("Logged out")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheResult, ObjectCache};
    use crate::cache::object_cache::moka::MokaObjectCache;
    use actix_web::{http::StatusCode, test::TestRequest, web};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_logout_drops_session_cache() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::new().unwrap());
        cache
            .insert_raw(session_cache_key("abc"), "{}".to_string(), 60)
            .await;

        let request = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc"))
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();

        let response = handle_logout(&request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            cache.get_raw(&session_cache_key("abc")).await,
            CacheResult::NotFound
        );
    }
}

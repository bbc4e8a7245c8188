/*!
 * 速率限制中间件
 *
 * 保护登录、验证码发送和 token 刷新接口，防止暴力破解。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 5 次/分钟/IP
 *     .route(web::post().to(login))
 * ```
 *
 * 已认证请求按用户 ID 计数，否则按客户端 IP 计数；超过限制返回 429。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::users::entities::User;
use crate::models::{ApiError, ErrorCode};

// 键: 前缀:标识，值: 当前窗口内的请求计数
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub const fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 发送验证码：3 次/分钟/IP
    pub fn send_otp() -> Self {
        Self::new("send_otp", 3, 60)
    }

    /// 刷新 token：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 计数并判断是否放行，返回剩余次数
    async fn hit(&self, identifier: &str) -> Option<u32> {
        let key = format!("{}:{}", self.key_prefix, identifier);
        let count = RATE_LIMIT_CACHE
            .entry(key)
            .and_upsert_with(|existing| {
                let current = existing.map(|e| e.into_value()).unwrap_or(0);
                std::future::ready(current.saturating_add(1))
            })
            .await
            .into_value();

        if count > self.max_requests {
            warn!(
                "Rate limit exceeded for {}:{} ({}/{})",
                self.key_prefix, identifier, count, self.max_requests
            );
            None
        } else {
            Some(self.max_requests - count)
        }
    }
}

/// 客户端 IP：优先连接信息，其次转发头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ip) = connection_ip.as_deref()
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next().map(str::trim)
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn rate_limited_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiError::new(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let user_id = req.extensions().get::<User>().map(|user| user.id);
            let identifier = match user_id {
                Some(id) => format!("user:{id}"),
                None => format!("ip:{}", extract_client_ip(&req)),
            };

            if limit.hit(&identifier).await.is_none() {
                return Ok(req.into_response(
                    rate_limited_response(limit.window_secs).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::send_otp().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().window_secs, 60);
    }

    #[tokio::test]
    async fn test_hits_beyond_limit_are_rejected() {
        let limit = RateLimit::new("test_hits", 2, 60);
        assert_eq!(limit.hit("ip:10.0.0.1").await, Some(1));
        assert_eq!(limit.hit("ip:10.0.0.1").await, Some(0));
        assert_eq!(limit.hit("ip:10.0.0.1").await, None);
        // 不同标识独立计数
        assert_eq!(limit.hit("ip:10.0.0.2").await, Some(1));
    }
}

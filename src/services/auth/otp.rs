use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error, warn};

use crate::models::auth::{OtpDispatchResponse, SendOtpRequest};
use crate::models::users::entities::UserStatus;
use crate::services::cache_from_request;
use crate::utils::random_code::generate_numeric_code;
use crate::utils::validate::validate_email;

use super::{AuthService, otp_cache_key};

/// 发送管理员验证码
///
/// 无论邮箱是否存在、是否为管理员都返回相同的 200 响应，避免账号枚举。
/// 验证码本身写入日志，由外部投递渠道转发。
pub async fn handle_send_otp(
    service: &AuthService,
    otp_request: SendOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let response = HttpResponse::Ok().json(OtpDispatchResponse {
        success: true,
        message: "If the account exists, a verification code has been sent".to_string(),
    });

    let email = otp_request.email.trim();
    if validate_email(email).is_err() {
        debug!("OTP requested for malformed email");
        return Ok(response);
    }

    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_email(email).await {
        Ok(Some(user)) if user.role.requires_otp() && user.status == UserStatus::Active => user,
        Ok(_) => {
            debug!("OTP requested for non-admin or unknown email");
            return Ok(response);
        }
        Err(e) => {
            error!("OTP user lookup failed: {}", e);
            return Ok(response);
        }
    };

    let Some(cache) = cache_from_request(request) else {
        error!("Object cache not configured, OTP not issued");
        return Ok(response);
    };

    let config = &service.get_config().otp;
    let code = generate_numeric_code(config.length);
    cache
        .insert_raw(otp_cache_key(user.id), code.clone(), config.ttl)
        .await;

    warn!(
        user_id = user.id,
        "OTP for {} ({}): {} (valid {}s)", user.username, user.email, code, config.ttl
    );

    Ok(response)
}

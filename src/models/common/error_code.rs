use serde::Serialize;
use ts_rs::TS;

/// API 错误码
///
/// 按千位分组：1xxx 请求错误，2xxx 认证授权，3xxx 资源不存在，4xxx 冲突与限流，5xxx 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    InvalidPayload = 1001,
    InvalidDate = 1002,
    StudentRollInvalid = 1003,
    SubjectCodeInvalid = 1004,
    SemesterInvalid = 1005,

    Unauthorized = 2000,
    AuthFailed = 2001,
    OtpRequired = 2002,
    OtpInvalid = 2003,
    Forbidden = 2010,

    NotFound = 3000,
    ExamNotFound = 3001,
    StudentNotFound = 3002,
    SubjectNotFound = 3003,

    Conflict = 4000,
    StudentAlreadyExists = 4001,
    SubjectAlreadyExists = 4002,
    RateLimitExceeded = 4029,

    InternalServerError = 5000,
}

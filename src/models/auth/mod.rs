pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, SendOtpRequest};
pub use responses::{LoginResponse, OtpDispatchResponse, RefreshTokenResponse, UserInfoResponse};

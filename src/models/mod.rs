//! 数据模型定义
//!
//! 按业务领域划分，每个领域包含 entities（业务实体）、requests（请求参数）、responses（响应结构）。

pub mod attendance;
pub mod auth;
pub mod common;
pub mod exams;
pub mod results;
pub mod students;
pub mod subjects;
pub mod users;

pub use common::{
    ApiError, ErrorCode, MessageResponse, PaginationInfo, PaginationQuery,
};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

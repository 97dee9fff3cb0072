pub mod accounts;
pub mod auth;
pub mod common;
pub mod courses;
pub mod homeworks;
pub mod solutions;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间，用于运行信息输出
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

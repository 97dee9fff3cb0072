use serde::Deserialize;
use ts_rs::TS;

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct CreateHomeworkRequest {
    pub title: String,
}

// 创建任务请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct CreateTaskRequest {
    pub title: String,
    pub max_rating: i32,
    /// 缺省为立即发布
    pub publication_date: Option<chrono::DateTime<chrono::Utc>>,
    pub deadline_date: Option<chrono::DateTime<chrono::Utc>>,
}

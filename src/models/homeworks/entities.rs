use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业：任务的容器
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct Homework {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub tasks: Vec<HomeworkTask>,
}

// 任务：评分以任务为单位
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkTask {
    pub id: i64,
    pub homework_id: i64,
    pub title: String,
    pub max_rating: i32,
    pub publication_date: chrono::DateTime<chrono::Utc>,
    pub deadline_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl HomeworkTask {
    /// 任务是否已发布
    pub fn is_published(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.publication_date <= now
    }
}

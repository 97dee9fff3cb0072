use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::AccountData;
use crate::models::homeworks::entities::HomeworkTask;
use crate::models::solutions::entities::Solution;
use crate::models::solutions::statistics::TaskSolutionsStats;

// 解答视图：附带小组成员与评分讲师的资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct GetSolutionModel {
    #[serde(flatten)]
    pub solution: Solution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_mates: Option<Vec<AccountData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<AccountData>,
}

// 某任务下一个学生（或一个任务）的解答集合
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct UserTaskSolutions {
    pub task_id: i64,
    pub title: String,
    pub max_rating: i32,
    pub solutions: Vec<GetSolutionModel>,
}

// 学生解答页数据（spec: taskSolution/{taskId}/{studentId}）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct UserTaskSolutionsPageData {
    pub course_id: i64,
    pub task: HomeworkTask,
    pub course_mates: Vec<AccountData>,
    pub task_solutions: Vec<UserTaskSolutions>,
}

// 讲师统计页中的一行：一个学生 + 其任务解答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct StudentSolutionsRow {
    pub user: AccountData,
    pub solutions: Vec<GetSolutionModel>,
}

// 讲师任务统计页数据
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct TaskSolutionStatisticsPageData {
    pub course_id: i64,
    pub students_solutions: Vec<StudentSolutionsRow>,
    pub stats_for_tasks: Vec<TaskSolutionsStats>,
}

// 未评分解答预览
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct SolutionPreview {
    pub student: AccountData,
    pub course_title: String,
    pub course_id: i64,
    pub homework_title: String,
    pub task_title: String,
    pub task_id: i64,
    pub publication_date: chrono::DateTime<chrono::Utc>,
    pub is_first_try: bool,
    pub group_id: Option<i64>,
    pub sent_after_deadline: bool,
    pub is_course_completed: bool,
}

// 未评分解答摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct UnratedSolutionPreviews {
    pub unrated_solutions: Vec<SolutionPreview>,
}

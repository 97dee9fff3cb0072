use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::solutions::entities::Solution;

// 单个学生在一门课上的解答统计：作业 → 任务 → 解答树
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct CourseStatistics {
    pub student_id: i64,
    pub homeworks: Vec<HomeworkStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct HomeworkStatistics {
    pub homework_id: i64,
    pub tasks: Vec<TaskStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct TaskStatistics {
    pub task_id: i64,
    pub solutions: Vec<Solution>,
}

// 某任务下单个学生的全部解答（讲师统计页使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct StudentTaskSolutions {
    pub student_id: i64,
    pub solutions: Vec<Solution>,
}

// 任务级聚合统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct TaskSolutionsStats {
    pub task_id: i64,
    /// 任务标题由聚合层回填
    pub title: String,
    pub solutions_count: i64,
    pub rated_count: i64,
}

// 未评分解答（附首次提交标记，供迟交判定）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct UnratedSolution {
    pub solution: Solution,
    pub is_first_try: bool,
}

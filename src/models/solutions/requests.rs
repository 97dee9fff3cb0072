use serde::Deserialize;
use ts_rs::TS;

// 提交解答请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct PostSolutionRequest {
    pub comment: Option<String>,
    pub github_url: Option<String>,
    /// 同组同学 id 列表；为空表示单人提交
    pub group_mate_ids: Option<Vec<i64>>,
}

// 评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct RateSolutionRequest {
    pub rating: i32,
    pub lecturer_comment: Option<String>,
}

// 空解答评分请求（学生在平台外交付的情况）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct RateEmptySolutionRequest {
    pub student_id: i64,
    pub rating: i32,
    pub lecturer_comment: Option<String>,
}

// 未评分解答查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct UnratedSolutionsQuery {
    pub task_id: Option<i64>,
}

// 评分草稿查询参数；缺省表示尚无解答（平台外交付评分）的草稿
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct RatingDraftQuery {
    pub solution_id: Option<i64>,
}

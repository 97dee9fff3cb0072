use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 解答状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub enum SolutionState {
    Posted, // 已提交，未评分
    Rated,  // 已评分
    Final,  // 已定稿
}

impl SolutionState {
    pub const POSTED: &'static str = "posted";
    pub const RATED: &'static str = "rated";
    pub const FINAL: &'static str = "final";

    /// 是否已被评分（含定稿）
    pub fn is_rated(&self) -> bool {
        !matches!(self, SolutionState::Posted)
    }
}

impl<'de> Deserialize<'de> for SolutionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SolutionState::POSTED => Ok(SolutionState::Posted),
            SolutionState::RATED => Ok(SolutionState::Rated),
            SolutionState::FINAL => Ok(SolutionState::Final),
            _ => Err(serde::de::Error::custom(format!(
                "无效的解答状态: '{s}'. 支持的状态: posted, rated, final"
            ))),
        }
    }
}

impl std::fmt::Display for SolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionState::Posted => write!(f, "{}", SolutionState::POSTED),
            SolutionState::Rated => write!(f, "{}", SolutionState::RATED),
            SolutionState::Final => write!(f, "{}", SolutionState::FINAL),
        }
    }
}

impl std::str::FromStr for SolutionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posted" => Ok(SolutionState::Posted),
            "rated" => Ok(SolutionState::Rated),
            "final" => Ok(SolutionState::Final),
            _ => Err(format!("Invalid solution state: {s}")),
        }
    }
}

// 解答实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/solution.ts")]
pub struct Solution {
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    pub group_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub rating: i32,
    pub comment: Option<String>,
    pub lecturer_comment: Option<String>,
    pub state: SolutionState,
    pub github_url: Option<String>,
    pub publication_date: chrono::DateTime<chrono::Utc>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::AccountData;
use crate::models::courses::entities::CourseDto;

// 用户课程列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UserCoursesResponse {
    pub courses: Vec<CourseDto>,
}

// 可邀请讲师列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AvailableLecturersResponse {
    pub lecturers: Vec<AccountData>,
}

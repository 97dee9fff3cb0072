use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 统一业务错误码，随 ApiResponse 返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    ValidationError = 1004,
    InternalServerError = 1005,

    // 账户
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    InvalidCredentials = 2003,

    // 课程
    CourseNotFound = 3001,
    CoursePermissionDenied = 3002,
    StudentNotEnrolled = 3003,
    AlreadyEnrolled = 3004,
    TaskNotFound = 3005,
    HomeworkNotFound = 3006,

    // 解答
    SolutionNotFound = 4001,
    GroupMemberNotEnrolled = 4002,
    RatingDraftNotFound = 4003,
}

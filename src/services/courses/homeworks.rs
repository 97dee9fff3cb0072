use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, ensure_course_mentor};
use crate::middlewares::RequireJWT;
use crate::models::homeworks::requests::{CreateHomeworkRequest, CreateTaskRequest};
use crate::models::{ApiResponse, ErrorCode};

/// 在课程下创建作业
pub async fn create_homework(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    homework_data: CreateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    if let Err(resp) = ensure_course_mentor(&storage, course_id, uid).await {
        return Ok(resp);
    }

    if homework_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Homework title must not be empty",
        )));
    }

    match storage.create_homework(course_id, homework_data).await {
        Ok(homework) => {
            info!("Homework {} created in course {}", homework.id, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                homework,
                "Homework created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create homework: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Homework creation failed",
                )),
            )
        }
    }
}

/// 在作业下创建任务
pub async fn create_task(
    service: &CourseService,
    request: &HttpRequest,
    homework_id: i64,
    task_data: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 作业 → 课程 → 导师校验
    let course = match storage.get_course_by_homework(homework_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::HomeworkNotFound,
                "Homework not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course by homework {}: {}", homework_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            );
        }
    };
    if !course.is_mentor(uid) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Caller is not a mentor of this course",
        )));
    }

    if task_data.max_rating <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Task max rating must be positive",
        )));
    }

    match storage.create_task(homework_id, task_data).await {
        Ok(task) => {
            info!("Task {} created in homework {}", task.id, homework_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(task, "Task created successfully")))
        }
        Err(e) => {
            error!("Failed to create task: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Task creation failed",
                )),
            )
        }
    }
}

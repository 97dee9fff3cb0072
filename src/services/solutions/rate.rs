use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{EMPTY_SOLUTION_COMMENT, GIVE_UP_COMMENT, SolutionService};
use crate::middlewares::RequireJWT;
use crate::models::solutions::requests::{RateEmptySolutionRequest, RateSolutionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::rating::RatingDraftStore;

/// 讲师给已提交的解答评分
pub async fn rate_solution(
    service: &SolutionService,
    request: &HttpRequest,
    solution_id: i64,
    rate_data: RateSolutionRequest,
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

    let solution = match storage.get_solution_by_id(solution_id).await {
        Ok(Some(solution)) => solution,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SolutionNotFound,
                "Solution not found",
            )));
        }
        Err(e) => {
            error!("Failed to get solution {}: {}", solution_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get solution",
                )),
            );
        }
    };

    // 仅课程导师可评分
    match storage.get_course_by_task(solution.task_id).await {
        Ok(Some(course)) if course.is_mentor(uid) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "Caller is not a mentor of this course",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            );
        }
    }

    if rate_data.rating < 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Rating must not be negative",
        )));
    }

    match storage
        .rate_solution(solution_id, uid, rate_data.rating, rate_data.lecturer_comment)
        .await
    {
        Ok(true) => {
            info!("Solution {} rated {} by {}", solution_id, rate_data.rating, uid);
            // 提交评分后草稿作废
            RatingDraftStore::new(service.get_cache(request))
                .clear(uid, solution.task_id, solution.student_id, Some(solution_id))
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Solution rated successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SolutionNotFound,
            "Solution not found",
        ))),
        Err(e) => {
            error!("Failed to rate solution {}: {}", solution_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to rate solution",
                )),
            )
        }
    }
}

/// 空解答评分：学生在平台外交付，讲师直接给分。
/// 解答正文固定为标记评语。
pub async fn rate_empty_solution(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    rate_data: RateEmptySolutionRequest,
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

    let course = match storage.get_course_by_task(task_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course by task {}: {}", task_id, e);
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
    if !course.is_accepted_student(rate_data.student_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this course",
        )));
    }
    if rate_data.rating < 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Rating must not be negative",
        )));
    }

    match storage
        .post_empty_solution_with_rate(
            task_id,
            rate_data.student_id,
            Some(uid),
            rate_data.rating,
            EMPTY_SOLUTION_COMMENT.to_string(),
            rate_data.lecturer_comment,
        )
        .await
    {
        Ok(solution) => {
            info!(
                "Empty solution {} rated {} for student {} by {}",
                solution.id, rate_data.rating, rate_data.student_id, uid
            );
            RatingDraftStore::new(service.get_cache(request))
                .clear(uid, task_id, rate_data.student_id, None)
                .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                solution,
                "Empty solution rated successfully",
            )))
        }
        Err(e) => {
            error!("Failed to rate empty solution: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to rate empty solution",
                )),
            )
        }
    }
}

/// 学生放弃任务：以零分空解答入库，正文为标记评语
pub async fn give_up(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
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

    let course = match storage.get_course_by_task(task_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course by task {}: {}", task_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            );
        }
    };

    if !course.is_accepted_student(uid) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this course",
        )));
    }

    match storage
        .post_empty_solution_with_rate(
            task_id,
            uid,
            None,
            0,
            GIVE_UP_COMMENT.to_string(),
            None,
        )
        .await
    {
        Ok(solution) => {
            info!("Student {} gave up task {}", uid, task_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(solution, "Task given up successfully")))
        }
        Err(e) => {
            error!("Failed to give up task {}: {}", task_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to give up task",
                )),
            )
        }
    }
}

/// 解答定稿：仅课程导师，且解答须已评分
pub async fn mark_solution_final(
    service: &SolutionService,
    request: &HttpRequest,
    solution_id: i64,
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

    let solution = match storage.get_solution_by_id(solution_id).await {
        Ok(Some(solution)) => solution,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SolutionNotFound,
                "Solution not found",
            )));
        }
        Err(e) => {
            error!("Failed to get solution {}: {}", solution_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get solution",
                )),
            );
        }
    };

    match storage.get_course_by_task(solution.task_id).await {
        Ok(Some(course)) if course.is_mentor(uid) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "Caller is not a mentor of this course",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            );
        }
    }

    if !solution.state.is_rated() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Solution must be rated before it can be finalized",
        )));
    }

    match storage.mark_solution_final(solution_id).await {
        Ok(true) => {
            info!("Solution {} marked final by {}", solution_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Solution marked as final")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SolutionNotFound,
            "Solution not found",
        ))),
        Err(e) => {
            error!("Failed to mark solution {} final: {}", solution_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to mark solution as final",
                )),
            )
        }
    }
}

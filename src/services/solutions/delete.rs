use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SolutionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 删除解答：提交者本人或课程导师可删
pub async fn delete_solution(
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

    if solution.student_id != uid {
        // 非本人时要求课程导师权限
        let is_mentor = match storage.get_course_by_task(solution.task_id).await {
            Ok(Some(course)) => course.is_mentor(uid),
            Ok(None) => false,
            Err(e) => {
                error!("Failed to resolve course: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to resolve course",
                    )),
                );
            }
        };
        if !is_mentor {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "Only the submitter or a course mentor can delete a solution",
            )));
        }
    }

    match storage.delete_solution(solution_id).await {
        Ok(true) => {
            info!("Solution {} deleted by {}", solution_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Solution deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SolutionNotFound,
            "Solution not found",
        ))),
        Err(e) => {
            error!("Failed to delete solution {}: {}", solution_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete solution",
                )),
            )
        }
    }
}

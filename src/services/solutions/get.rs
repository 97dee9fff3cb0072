use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{SolutionService, annotate_solution};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_solution(
    service: &SolutionService,
    request: &HttpRequest,
    solution_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 解析所属课程以补充小组与讲师资料
    let course = match storage.get_course_by_task(solution.task_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found for solution",
            )));
        }
        Err(e) => {
            error!("Failed to resolve course for solution {}: {}", solution_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            );
        }
    };

    match annotate_solution(&storage, &course, solution).await {
        Ok(model) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            model,
            "Solution retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to annotate solution {}: {}", solution_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to annotate solution",
                )),
            )
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::responses::UserCoursesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn user_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    match storage.list_user_courses(user.id, user.role).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserCoursesResponse { courses },
            "User courses retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list user courses: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list user courses",
                )),
            )
        }
    }
}

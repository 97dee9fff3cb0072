use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, ensure_course_mentor};
use crate::events::CourseEvent;
use crate::middlewares::RequireJWT;
use crate::models::accounts::entities::UserRole;
use crate::models::courses::requests::InviteLecturerRequest;
use crate::models::courses::responses::AvailableLecturersResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 按邮箱邀请讲师加入课程
pub async fn invite_lecturer(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    invite_data: InviteLecturerRequest,
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

    // 被邀请者必须存在且为讲师
    let lecturer = match storage.get_user_by_email(&invite_data.lecturer_email).await {
        Ok(Some(user)) => {
            if user.role != UserRole::Lecturer {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    "Invited user is not a lecturer",
                )));
            }
            user
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Lecturer not found",
            )));
        }
        Err(e) => {
            error!("Failed to resolve lecturer by email: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve lecturer",
                )),
            );
        }
    };

    match storage.add_course_mentor(course_id, lecturer.id).await {
        Ok(true) => {
            info!(
                "Lecturer {} invited to course {} by {}",
                lecturer.id, course_id, uid
            );
            // 被邀请者若曾以学生身份入课，移除该成员记录
            if let Err(e) = storage.reject_course_mate(course_id, lecturer.id).await {
                error!(
                    "Failed to clean up student enrollment for invited lecturer {}: {}",
                    lecturer.id, e
                );
            }
            service.get_event_bus(request).publish(CourseEvent::LecturerInvited {
                course_id,
                lecturer_id: lecturer.id,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lecturer invited")))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyEnrolled,
            "Lecturer is already a mentor of this course",
        ))),
        Err(e) => {
            error!("Failed to invite lecturer: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Invitation failed",
                )),
            )
        }
    }
}

/// 尚未执教该课程的讲师列表
pub async fn available_lecturers(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
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

    let course = match ensure_course_mentor(&storage, course_id, uid).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    match storage.get_all_lecturers().await {
        Ok(lecturers) => {
            let available: Vec<_> = lecturers
                .into_iter()
                .filter(|l| !course.mentor_ids.contains(&l.user_id))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AvailableLecturersResponse {
                    lecturers: available,
                },
                "Available lecturers retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list lecturers: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list lecturers",
                )),
            )
        }
    }
}

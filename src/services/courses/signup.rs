use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, ensure_course_mentor};
use crate::events::CourseEvent;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 学生提交入课申请
pub async fn sign_up(
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

    match storage.get_course(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load course",
                )),
            );
        }
    }

    match storage.add_course_mate(course_id, uid).await {
        Ok(true) => {
            info!("Student {} signed up for course {}", uid, course_id);
            service.get_event_bus(request).publish(CourseEvent::CourseMateRequested {
                course_id,
                student_id: uid,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Sign-up request submitted")))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyEnrolled,
            "Student has already requested enrollment in this course",
        ))),
        Err(e) => {
            error!("Failed to sign up for course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Sign-up failed",
                )),
            )
        }
    }
}

/// 讲师接受入课申请
pub async fn accept_student(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    student_id: i64,
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

    match storage.accept_course_mate(course_id, student_id).await {
        Ok(true) => {
            info!(
                "Student {} accepted into course {} by {}",
                student_id, course_id, uid
            );
            service.get_event_bus(request).publish(CourseEvent::CourseMateAccepted {
                course_id,
                student_id,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student accepted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "No enrollment request found for this student",
        ))),
        Err(e) => {
            error!("Failed to accept student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Accept failed",
                )),
            )
        }
    }
}

/// 讲师拒绝入课申请
pub async fn reject_student(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    student_id: i64,
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

    match storage.reject_course_mate(course_id, student_id).await {
        Ok(true) => {
            info!(
                "Student {} rejected from course {} by {}",
                student_id, course_id, uid
            );
            service.get_event_bus(request).publish(CourseEvent::CourseMateRejected {
                course_id,
                student_id,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student rejected")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "No enrollment request found for this student",
        ))),
        Err(e) => {
            error!("Failed to reject student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Reject failed",
                )),
            )
        }
    }
}

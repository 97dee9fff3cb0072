use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SolutionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::rating::RatingDraftStore;
use crate::rating::draft::RatingDraft;

/// 草稿操作共用的导师校验，通过后返回讲师 id
async fn ensure_draft_access(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
) -> Result<i64, HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    match storage.get_course_by_task(task_id).await {
        Ok(Some(course)) if course.is_mentor(uid) => Ok(uid),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Caller is not a mentor of this course",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => {
            error!("Failed to resolve course by task {}: {}", task_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve course",
                )),
            )
        }
    }
}

/// 读取评分草稿
pub async fn get_rating_draft(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    student_id: i64,
    solution_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let uid = match ensure_draft_access(service, request, task_id).await {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    let store = RatingDraftStore::new(service.get_cache(request));
    match store.get(uid, task_id, student_id, solution_id).await {
        Some(draft) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            draft,
            "Rating draft retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RatingDraftNotFound,
            "No rating draft found",
        ))),
    }
}

/// 写入评分草稿（每次编辑覆盖写）
pub async fn put_rating_draft(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    student_id: i64,
    solution_id: Option<i64>,
    draft: RatingDraft,
) -> ActixResult<HttpResponse> {
    let uid = match ensure_draft_access(service, request, task_id).await {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    if draft.points < 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Draft points must not be negative",
        )));
    }

    let store = RatingDraftStore::new(service.get_cache(request));
    store.put(uid, task_id, student_id, solution_id, &draft).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Rating draft saved")))
}

/// 清除评分草稿（取消编辑）
pub async fn delete_rating_draft(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    student_id: i64,
    solution_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let uid = match ensure_draft_access(service, request, task_id).await {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    let store = RatingDraftStore::new(service.get_cache(request));
    store.clear(uid, task_id, student_id, solution_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Rating draft cleared")))
}

pub mod create;
pub mod delete;
pub mod get;
pub mod homeworks;
pub mod lecturers;
pub mod list;
pub mod signup;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::events::EventBus;
use crate::models::courses::requests::{
    CreateCourseRequest, InviteLecturerRequest, UpdateCourseRequest,
};
use crate::models::homeworks::requests::{CreateHomeworkRequest, CreateTaskRequest};
use crate::storage::Storage;

/// 加载课程并校验调用者是课程导师，失败时返回现成的错误响应
pub(crate) async fn ensure_course_mentor(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user_id: i64,
) -> Result<crate::models::courses::entities::CourseDto, HttpResponse> {
    use crate::models::{ApiResponse, ErrorCode};

    match storage.get_course(course_id).await {
        Ok(Some(course)) => {
            if course.is_mentor(user_id) {
                Ok(course)
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "Caller is not a mentor of this course",
                )))
            }
        }
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to load course {}: {}", course_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load course",
                )),
            )
        }
    }
}

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_event_bus(&self, request: &HttpRequest) -> EventBus {
        request
            .app_data::<actix_web::web::Data<EventBus>>()
            .expect("Event bus not found in app data")
            .get_ref()
            .clone()
    }

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 获取课程聚合视图
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    // 当前用户的课程列表
    pub async fn user_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::user_courses(self, request).await
    }

    // 更新课程
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 学生入课申请
    pub async fn sign_up(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        signup::sign_up(self, request, course_id).await
    }

    // 接受入课申请
    pub async fn accept_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        signup::accept_student(self, request, course_id, student_id).await
    }

    // 拒绝入课申请
    pub async fn reject_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        signup::reject_student(self, request, course_id, student_id).await
    }

    // 邀请讲师
    pub async fn invite_lecturer(
        &self,
        request: &HttpRequest,
        course_id: i64,
        invite_data: InviteLecturerRequest,
    ) -> ActixResult<HttpResponse> {
        lecturers::invite_lecturer(self, request, course_id, invite_data).await
    }

    // 可邀请讲师列表
    pub async fn available_lecturers(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        lecturers::available_lecturers(self, request, course_id).await
    }

    // 创建作业
    pub async fn create_homework(
        &self,
        request: &HttpRequest,
        course_id: i64,
        homework_data: CreateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        homeworks::create_homework(self, request, course_id, homework_data).await
    }

    // 创建任务
    pub async fn create_task(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        task_data: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        homeworks::create_task(self, request, homework_id, task_data).await
    }
}

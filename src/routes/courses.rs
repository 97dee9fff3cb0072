use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::UserRole;
use crate::models::courses::requests::{
    CreateCourseRequest, InviteLecturerRequest, UpdateCourseRequest,
};
use crate::models::homeworks::requests::{CreateHomeworkRequest, CreateTaskRequest};
use crate::services::courses::CourseService;

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn user_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.user_courses(&req).await
}

pub async fn get_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.into_inner()).await
}

pub async fn update_course(
    req: HttpRequest,
    path: web::Path<i64>,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, path.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, path.into_inner()).await
}

pub async fn sign_up(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.sign_up(&req, path.into_inner()).await
}

pub async fn accept_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    COURSE_SERVICE
        .accept_student(&req, course_id, student_id)
        .await
}

pub async fn reject_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    COURSE_SERVICE
        .reject_student(&req, course_id, student_id)
        .await
}

pub async fn invite_lecturer(
    req: HttpRequest,
    path: web::Path<i64>,
    invite_data: web::Json<InviteLecturerRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .invite_lecturer(&req, path.into_inner(), invite_data.into_inner())
        .await
}

pub async fn available_lecturers(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .available_lecturers(&req, path.into_inner())
        .await
}

pub async fn create_homework(
    req: HttpRequest,
    path: web::Path<i64>,
    homework_data: web::Json<CreateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_homework(&req, path.into_inner(), homework_data.into_inner())
        .await
}

pub async fn create_task(
    req: HttpRequest,
    path: web::Path<i64>,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_task(&req, path.into_inner(), task_data.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::RequireJWT)
            // 创建课程（讲师）
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(create_course)),
            )
            // 当前用户的课程列表
            .service(web::resource("/userCourses").route(web::get().to(user_courses)))
            // 学生入课申请
            .service(
                web::resource("/signUp/{course_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route(web::post().to(sign_up)),
            )
            // 处理入课申请（讲师）
            .service(
                web::resource("/acceptStudent/{course_id}/{student_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(accept_student)),
            )
            .service(
                web::resource("/rejectStudent/{course_id}/{student_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(reject_student)),
            )
            // 讲师邀请（讲师）
            .service(
                web::resource("/inviteLecturer/{course_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(invite_lecturer)),
            )
            .service(
                web::resource("/availableLecturers/{course_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::get().to(available_lecturers)),
            )
            // 作业与任务（讲师）
            .service(
                web::resource("/{course_id}/homeworks")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(create_homework)),
            )
            .service(
                web::resource("/homeworks/{homework_id}/tasks")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(create_task)),
            )
            // 课程聚合视图与维护，修改与删除在服务层校验导师身份
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            ),
    );
}

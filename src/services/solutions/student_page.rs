use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{SolutionService, annotate_solution};
use crate::models::solutions::responses::{UserTaskSolutions, UserTaskSolutionsPageData};
use crate::models::{ApiResponse, ErrorCode};

/// 学生解答页数据组装：
/// 沿 任务→作业→课程 链解析课程，校验学生已入课，
/// 统计树与成员资料并发拉取，每个任务一条记录、每条解答带小组与讲师注解。
pub async fn task_solution_page(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_task(task_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
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

    let Some(task) = course.all_tasks().find(|t| t.id == task_id).cloned() else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        )));
    };

    if !course.is_accepted_student(student_id) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this course",
        )));
    }

    // 统计树与课程成员资料并发拉取
    let accepted_ids = course.accepted_student_ids();
    let (statistics, course_mates) = tokio::join!(
        storage.get_course_statistics(course.id, student_id),
        storage.get_accounts_data(&accepted_ids),
    );

    let statistics = match statistics {
        Ok(Some(stats)) => stats,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course statistics not found",
            )));
        }
        Err(e) => {
            error!("Failed to fetch course statistics: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to fetch course statistics",
                )),
            );
        }
    };
    let course_mates = match course_mates {
        Ok(mates) => mates,
        Err(e) => {
            error!("Failed to fetch course mate profiles: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to fetch course mate profiles",
                )),
            );
        }
    };

    // 每个任务一条记录，解答带注解
    let mut task_solutions = Vec::new();
    for hw_stats in statistics.homeworks {
        for task_stats in hw_stats.tasks {
            let Some(task_def) = course.all_tasks().find(|t| t.id == task_stats.task_id) else {
                continue;
            };
            let mut annotated = Vec::with_capacity(task_stats.solutions.len());
            for solution in task_stats.solutions {
                match annotate_solution(&storage, &course, solution).await {
                    Ok(model) => annotated.push(model),
                    Err(e) => {
                        error!("Failed to annotate solution: {}", e);
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                "Failed to annotate solution",
                            ),
                        ));
                    }
                }
            }
            task_solutions.push(UserTaskSolutions {
                task_id: task_def.id,
                title: task_def.title.clone(),
                max_rating: task_def.max_rating,
                solutions: annotated,
            });
        }
    }

    let page = UserTaskSolutionsPageData {
        course_id: course.id,
        task,
        course_mates,
        task_solutions,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        "Task solutions retrieved successfully",
    )))
}

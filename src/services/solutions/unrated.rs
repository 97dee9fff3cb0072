use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SolutionService;
use crate::middlewares::RequireJWT;
use crate::models::accounts::entities::UserRole;
use crate::models::courses::entities::CourseDto;
use crate::models::homeworks::entities::HomeworkTask;
use crate::models::solutions::requests::UnratedSolutionsQuery;
use crate::models::solutions::responses::{SolutionPreview, UnratedSolutionPreviews};
use crate::models::{ApiResponse, ErrorCode};

/// 任务及其课程/作业上下文
#[derive(Debug, Clone)]
struct TaskContext {
    course_id: i64,
    course_title: String,
    is_course_completed: bool,
    homework_title: String,
    task: HomeworkTask,
}

/// 收集讲师课程下的任务。指定任务 id 时命中即止，
/// 未指定时收集全部课程的全部任务。
fn collect_tasks(courses: &[CourseDto], filter_task_id: Option<i64>) -> Vec<TaskContext> {
    let mut result = Vec::new();
    for course in courses {
        for homework in &course.homeworks {
            for task in &homework.tasks {
                if let Some(wanted) = filter_task_id {
                    if task.id == wanted {
                        return vec![TaskContext {
                            course_id: course.id,
                            course_title: format!("{} / {}", course.name, course.group_name),
                            is_course_completed: course.is_completed,
                            homework_title: homework.title.clone(),
                            task: task.clone(),
                        }];
                    }
                } else {
                    result.push(TaskContext {
                        course_id: course.id,
                        course_title: format!("{} / {}", course.name, course.group_name),
                        is_course_completed: course.is_completed,
                        homework_title: homework.title.clone(),
                        task: task.clone(),
                    });
                }
            }
        }
    }
    if filter_task_id.is_some() {
        // 指定的任务不在讲师的课程里
        return Vec::new();
    }
    result
}

/// 迟交判定：仅首次提交、任务有截止时间、提交时间严格晚于截止时间
fn sent_after_deadline(
    is_first_try: bool,
    deadline_date: Option<chrono::DateTime<chrono::Utc>>,
    publication_date: chrono::DateTime<chrono::Utc>,
) -> bool {
    is_first_try
        && match deadline_date {
            Some(deadline) => publication_date > deadline,
            None => false,
        }
}

/// 未评分解答摘要：讲师全部课程（或指定任务）下的待评分解答，
/// 连接提交者资料并标注迟交
pub async fn unrated_solutions(
    service: &SolutionService,
    request: &HttpRequest,
    query: UnratedSolutionsQuery,
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

    let courses = match storage.list_user_courses(uid, UserRole::Lecturer).await {
        Ok(courses) => courses,
        Err(e) => {
            error!("Failed to list lecturer courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list lecturer courses",
                )),
            );
        }
    };

    let task_contexts = collect_tasks(&courses, query.task_id);
    let task_ids: Vec<i64> = task_contexts.iter().map(|t| t.task.id).collect();
    let by_task: HashMap<i64, &TaskContext> =
        task_contexts.iter().map(|t| (t.task.id, t)).collect();

    let unrated = match storage.get_unrated_solutions_for_tasks(&task_ids).await {
        Ok(unrated) => unrated,
        Err(e) => {
            error!("Failed to fetch unrated solutions: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to fetch unrated solutions",
                )),
            );
        }
    };

    // 提交者资料一次性批量解析
    let student_ids: Vec<i64> = unrated.iter().map(|u| u.solution.student_id).collect();
    let accounts = match storage.get_accounts_data(&student_ids).await {
        Ok(accounts) => accounts,
        Err(e) => {
            error!("Failed to fetch submitter profiles: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to fetch submitter profiles",
                )),
            );
        }
    };
    let accounts_by_id: HashMap<i64, _> =
        accounts.into_iter().map(|a| (a.user_id, a)).collect();

    let previews: Vec<SolutionPreview> = unrated
        .into_iter()
        .filter_map(|u| {
            let ctx = by_task.get(&u.solution.task_id)?;
            let student = accounts_by_id.get(&u.solution.student_id)?.clone();
            Some(SolutionPreview {
                student,
                course_title: ctx.course_title.clone(),
                course_id: ctx.course_id,
                homework_title: ctx.homework_title.clone(),
                task_title: ctx.task.title.clone(),
                task_id: ctx.task.id,
                publication_date: u.solution.publication_date,
                is_first_try: u.is_first_try,
                group_id: u.solution.group_id,
                sent_after_deadline: sent_after_deadline(
                    u.is_first_try,
                    ctx.task.deadline_date,
                    u.solution.publication_date,
                ),
                is_course_completed: ctx.is_course_completed,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnratedSolutionPreviews {
            unrated_solutions: previews,
        },
        "Unrated solutions retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::CourseDto;
    use crate::models::homeworks::entities::Homework;
    use chrono::{Duration, Utc};

    fn task(id: i64, homework_id: i64) -> HomeworkTask {
        HomeworkTask {
            id,
            homework_id,
            title: format!("Задача {id}"),
            max_rating: 10,
            publication_date: Utc::now() - Duration::days(7),
            deadline_date: None,
        }
    }

    fn course(id: i64, homeworks: Vec<Homework>) -> CourseDto {
        CourseDto {
            id,
            name: format!("Курс {id}"),
            group_name: "ПИ-101".to_string(),
            invite_code: "ABCD1234".to_string(),
            is_open: true,
            is_completed: false,
            mentor_ids: vec![1],
            course_mates: Vec::new(),
            homeworks,
            groups: Vec::new(),
        }
    }

    fn homework(id: i64, course_id: i64, task_ids: &[i64]) -> Homework {
        Homework {
            id,
            course_id,
            title: format!("ДЗ {id}"),
            tasks: task_ids.iter().map(|t| task(*t, id)).collect(),
        }
    }

    #[test]
    fn test_collect_all_tasks_without_filter() {
        let courses = vec![
            course(1, vec![homework(1, 1, &[10, 11])]),
            course(2, vec![homework(2, 2, &[20])]),
        ];
        let contexts = collect_tasks(&courses, None);
        let ids: Vec<i64> = contexts.iter().map(|c| c.task.id).collect();
        assert_eq!(ids, vec![10, 11, 20]);
    }

    #[test]
    fn test_exact_task_filter_short_circuits() {
        let courses = vec![
            course(1, vec![homework(1, 1, &[10, 11])]),
            course(2, vec![homework(2, 2, &[20])]),
        ];
        let contexts = collect_tasks(&courses, Some(11));
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].task.id, 11);
        assert_eq!(contexts[0].course_id, 1);
        assert_eq!(contexts[0].course_title, "Курс 1 / ПИ-101");
    }

    #[test]
    fn test_unknown_task_filter_yields_nothing() {
        let courses = vec![course(1, vec![homework(1, 1, &[10])])];
        assert!(collect_tasks(&courses, Some(99)).is_empty());
    }

    #[test]
    fn test_sent_after_deadline_requires_all_three_conditions() {
        let deadline = Utc::now();
        let after = deadline + Duration::hours(1);
        let before = deadline - Duration::hours(1);

        assert!(sent_after_deadline(true, Some(deadline), after));
        // 非首次提交不算迟交
        assert!(!sent_after_deadline(false, Some(deadline), after));
        // 无截止时间不算迟交
        assert!(!sent_after_deadline(true, None, after));
        // 截止前提交不算迟交
        assert!(!sent_after_deadline(true, Some(deadline), before));
        // 恰好压线不算迟交，严格不等式
        assert!(!sent_after_deadline(true, Some(deadline), deadline));
    }
}

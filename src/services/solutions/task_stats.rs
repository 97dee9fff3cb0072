use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{SolutionService, annotate_solution};
use crate::middlewares::RequireJWT;
use crate::models::accounts::entities::AccountData;
use crate::models::solutions::entities::Solution;
use crate::models::solutions::responses::{StudentSolutionsRow, TaskSolutionStatisticsPageData};
use crate::models::solutions::statistics::StudentTaskSolutions;
use crate::models::{ApiResponse, ErrorCode};

/// 按 (姓氏, 名字) 升序排列学生资料
fn order_students(mut accounts: Vec<AccountData>) -> Vec<AccountData> {
    accounts.sort_by(|a, b| {
        a.surname
            .cmp(&b.surname)
            .then_with(|| a.name.cmp(&b.name))
    });
    accounts
}

/// 按学生 id 连接资料与统计；统计里缺席的学生得到空解答列表
fn join_student_rows(
    students: Vec<AccountData>,
    stats: Vec<StudentTaskSolutions>,
) -> Vec<(AccountData, Vec<Solution>)> {
    let mut by_student: HashMap<i64, Vec<Solution>> = stats
        .into_iter()
        .map(|s| (s.student_id, s.solutions))
        .collect();

    students
        .into_iter()
        .map(|account| {
            let solutions = by_student.remove(&account.user_id).unwrap_or_default();
            (account, solutions)
        })
        .collect()
}

/// 讲师任务统计页数据组装：
/// 仅课程导师可访问；学生资料、该任务的分学生统计、
/// 全部已发布任务的聚合统计三路并发拉取后按学生 id 连接。
pub async fn task_statistics_page(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
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

    if !course.is_mentor(uid) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Caller is not a mentor of this course",
        )));
    }

    // 只统计已发布的任务
    let now = chrono::Utc::now();
    let published_task_ids: Vec<i64> = course
        .all_tasks()
        .filter(|t| t.is_published(now))
        .map(|t| t.id)
        .collect();
    if !published_task_ids.contains(&task_id) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found or not yet published",
        )));
    }

    let accepted_ids = course.accepted_student_ids();

    // 三路并发：学生资料、该任务分学生统计、全部任务聚合统计
    let (students, task_statistics, stats_for_tasks) = tokio::join!(
        storage.get_accounts_data(&accepted_ids),
        storage.get_task_solution_statistics(task_id),
        storage.get_task_solutions_stats(&published_task_ids),
    );

    let (students, task_statistics, stats_for_tasks) =
        match (students, task_statistics, stats_for_tasks) {
            (Ok(s), Ok(t), Ok(a)) => (s, t, a),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                error!("Failed to assemble task statistics page: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to assemble task statistics",
                    )),
                );
            }
        };

    let mut students_solutions = Vec::new();
    for (account, solutions) in join_student_rows(order_students(students), task_statistics) {
        let mut annotated = Vec::with_capacity(solutions.len());
        for solution in solutions {
            match annotate_solution(&storage, &course, solution).await {
                Ok(model) => annotated.push(model),
                Err(e) => {
                    error!("Failed to annotate solution: {}", e);
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Failed to annotate solution",
                        )),
                    );
                }
            }
        }
        students_solutions.push(StudentSolutionsRow {
            user: account,
            solutions: annotated,
        });
    }

    let page = TaskSolutionStatisticsPageData {
        course_id: course.id,
        students_solutions,
        stats_for_tasks,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        "Task statistics retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::UserRole;
    use crate::models::solutions::entities::SolutionState;

    fn account(user_id: i64, surname: &str, name: &str) -> AccountData {
        AccountData {
            user_id,
            name: name.to_string(),
            surname: surname.to_string(),
            middle_name: None,
            email: format!("{surname}@example.com"),
            role: UserRole::Student,
            is_external_auth: false,
        }
    }

    fn solution(id: i64, student_id: i64) -> Solution {
        Solution {
            id,
            task_id: 1,
            student_id,
            group_id: None,
            lecturer_id: None,
            rating: 0,
            comment: None,
            lecturer_comment: None,
            state: SolutionState::Posted,
            github_url: None,
            publication_date: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_students_ordered_by_surname_then_name() {
        let students = vec![
            account(1, "Петров", "Борис"),
            account(2, "Иванов", "Антон"),
            account(3, "Иванов", "Алексей"),
        ];
        let ordered = order_students(students);
        let ids: Vec<i64> = ordered.iter().map(|a| a.user_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_student_missing_from_stats_gets_empty_row() {
        let students = vec![account(1, "Иванов", "Антон"), account(2, "Петров", "Борис")];
        let stats = vec![StudentTaskSolutions {
            student_id: 2,
            solutions: vec![solution(10, 2)],
        }];

        let rows = join_student_rows(students, stats);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].1.is_empty());
        assert_eq!(rows[1].1.len(), 1);
    }

    #[test]
    fn test_rows_follow_input_ordering_not_stats_ordering() {
        let students = vec![account(5, "А", "А"), account(3, "Б", "Б")];
        let stats = vec![
            StudentTaskSolutions {
                student_id: 3,
                solutions: vec![solution(1, 3)],
            },
            StudentTaskSolutions {
                student_id: 5,
                solutions: vec![solution(2, 5)],
            },
        ];

        let rows = join_student_rows(students, stats);
        assert_eq!(rows[0].0.user_id, 5);
        assert_eq!(rows[1].0.user_id, 3);
    }
}

use std::collections::BTreeSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SolutionService;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Group;
use crate::models::solutions::requests::PostSolutionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::NewSolution;
use crate::utils::validate::validate_github_url;

/// 在现有小组中查找成员集合完全一致的小组（集合相等，与顺序无关）
fn find_matching_group(groups: &[Group], member_set: &BTreeSet<i64>) -> Option<i64> {
    groups
        .iter()
        .find(|g| {
            g.student_ids.len() == member_set.len()
                && g.student_ids.iter().all(|id| member_set.contains(id))
        })
        .map(|g| g.id)
}

/// 提交解答。携带同组同学时先去重成员集合，
/// 全员须为已接受的课程成员；存在同集合小组则复用，否则新建。
pub async fn post_solution(
    service: &SolutionService,
    request: &HttpRequest,
    task_id: i64,
    solution_data: PostSolutionRequest,
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
                ErrorCode::TaskNotFound,
                "Task not found",
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

    if !course.is_accepted_student(uid) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Submitter is not enrolled in this course",
        )));
    }

    if let Some(ref url) = solution_data.github_url
        && let Err(msg) = validate_github_url(url)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 小组解析：无同组同学时为单人提交
    let group_id = match solution_data.group_mate_ids {
        Some(ref mates) if !mates.is_empty() => {
            let mut member_set: BTreeSet<i64> = mates.iter().copied().collect();
            member_set.insert(uid);

            // 全员须为已接受的课程成员
            if let Some(outsider) = member_set
                .iter()
                .find(|id| !course.is_accepted_student(**id))
            {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::GroupMemberNotEnrolled,
                    format!("Group member {outsider} is not enrolled in this course"),
                )));
            }

            match find_matching_group(&course.groups, &member_set) {
                Some(existing) => Some(existing),
                None => {
                    let members: Vec<i64> = member_set.into_iter().collect();
                    match storage.create_course_group(course.id, &members).await {
                        Ok(new_group) => Some(new_group),
                        Err(e) => {
                            error!("Failed to create course group: {}", e);
                            return Ok(HttpResponse::InternalServerError().json(
                                ApiResponse::error_empty(
                                    ErrorCode::InternalServerError,
                                    "Failed to create course group",
                                ),
                            ));
                        }
                    }
                }
            }
        }
        _ => None,
    };

    let new_solution = NewSolution {
        student_id: uid,
        group_id,
        comment: solution_data.comment,
        github_url: solution_data.github_url,
    };

    match storage.post_solution(task_id, new_solution).await {
        Ok(solution) => {
            info!(
                "Solution {} posted by student {} for task {}",
                solution.id, uid, task_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                solution,
                "Solution posted successfully",
            )))
        }
        Err(e) => {
            error!("Failed to post solution for task {}: {}", task_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to post solution",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, students: &[i64]) -> Group {
        Group {
            id,
            course_id: 1,
            student_ids: students.to_vec(),
        }
    }

    fn set(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_matching_group_found_regardless_of_order() {
        let groups = vec![group(1, &[10, 20]), group(2, &[30, 20, 10])];
        assert_eq!(find_matching_group(&groups, &set(&[20, 10])), Some(1));
        assert_eq!(find_matching_group(&groups, &set(&[10, 20, 30])), Some(2));
    }

    #[test]
    fn test_no_match_for_subset_or_superset() {
        let groups = vec![group(1, &[10, 20, 30])];
        assert_eq!(find_matching_group(&groups, &set(&[10, 20])), None);
        assert_eq!(find_matching_group(&groups, &set(&[10, 20, 30, 40])), None);
    }

    #[test]
    fn test_no_match_on_empty_group_list() {
        assert_eq!(find_matching_group(&[], &set(&[10])), None);
    }
}

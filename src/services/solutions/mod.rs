pub mod delete;
pub mod drafts;
pub mod get;
pub mod post;
pub mod rate;
pub mod student_page;
pub mod task_stats;
pub mod unrated;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::models::courses::entities::CourseDto;
use crate::models::solutions::entities::Solution;
use crate::models::solutions::requests::{
    PostSolutionRequest, RateEmptySolutionRequest, RateSolutionRequest, UnratedSolutionsQuery,
};
use crate::models::solutions::responses::GetSolutionModel;
use crate::rating::draft::RatingDraft;
use crate::storage::Storage;

/// 平台外交付的空解答标记评语
pub(crate) const EMPTY_SOLUTION_COMMENT: &str = "[Решение было сдано вне сервиса]";
/// 放弃任务的空解答标记评语
pub(crate) const GIVE_UP_COMMENT: &str = "[Студент отказался от выполнения задачи]";

/// 为解答补充小组成员与评分讲师的资料
pub(crate) async fn annotate_solution(
    storage: &Arc<dyn Storage>,
    course: &CourseDto,
    solution: Solution,
) -> Result<GetSolutionModel> {
    let group_mates = match solution.group_id {
        Some(group_id) => match course.groups.iter().find(|g| g.id == group_id) {
            Some(group) => Some(storage.get_accounts_data(&group.student_ids).await?),
            None => None,
        },
        None => None,
    };

    let lecturer = match solution.lecturer_id {
        Some(lecturer_id) => storage
            .get_accounts_data(&[lecturer_id])
            .await?
            .into_iter()
            .next(),
        None => None,
    };

    Ok(GetSolutionModel {
        solution,
        group_mates,
        lecturer,
    })
}

pub struct SolutionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SolutionService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    // 获取单个解答
    pub async fn get_solution(
        &self,
        request: &HttpRequest,
        solution_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_solution(self, request, solution_id).await
    }

    // 学生解答页数据
    pub async fn task_solution_page(
        &self,
        request: &HttpRequest,
        task_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        student_page::task_solution_page(self, request, task_id, student_id).await
    }

    // 讲师任务统计页数据
    pub async fn task_statistics_page(
        &self,
        request: &HttpRequest,
        task_id: i64,
    ) -> ActixResult<HttpResponse> {
        task_stats::task_statistics_page(self, request, task_id).await
    }

    // 提交解答
    pub async fn post_solution(
        &self,
        request: &HttpRequest,
        task_id: i64,
        solution_data: PostSolutionRequest,
    ) -> ActixResult<HttpResponse> {
        post::post_solution(self, request, task_id, solution_data).await
    }

    // 评分
    pub async fn rate_solution(
        &self,
        request: &HttpRequest,
        solution_id: i64,
        rate_data: RateSolutionRequest,
    ) -> ActixResult<HttpResponse> {
        rate::rate_solution(self, request, solution_id, rate_data).await
    }

    // 空解答评分（平台外交付）
    pub async fn rate_empty_solution(
        &self,
        request: &HttpRequest,
        task_id: i64,
        rate_data: RateEmptySolutionRequest,
    ) -> ActixResult<HttpResponse> {
        rate::rate_empty_solution(self, request, task_id, rate_data).await
    }

    // 学生放弃任务
    pub async fn give_up(&self, request: &HttpRequest, task_id: i64) -> ActixResult<HttpResponse> {
        rate::give_up(self, request, task_id).await
    }

    // 解答定稿
    pub async fn mark_solution_final(
        &self,
        request: &HttpRequest,
        solution_id: i64,
    ) -> ActixResult<HttpResponse> {
        rate::mark_solution_final(self, request, solution_id).await
    }

    // 删除解答
    pub async fn delete_solution(
        &self,
        request: &HttpRequest,
        solution_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_solution(self, request, solution_id).await
    }

    // 未评分解答摘要
    pub async fn unrated_solutions(
        &self,
        request: &HttpRequest,
        query: UnratedSolutionsQuery,
    ) -> ActixResult<HttpResponse> {
        unrated::unrated_solutions(self, request, query).await
    }

    // 读取评分草稿
    pub async fn get_rating_draft(
        &self,
        request: &HttpRequest,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        drafts::get_rating_draft(self, request, task_id, student_id, solution_id).await
    }

    // 写入评分草稿
    pub async fn put_rating_draft(
        &self,
        request: &HttpRequest,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
        draft: RatingDraft,
    ) -> ActixResult<HttpResponse> {
        drafts::put_rating_draft(self, request, task_id, student_id, solution_id, draft).await
    }

    // 清除评分草稿
    pub async fn delete_rating_draft(
        &self,
        request: &HttpRequest,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        drafts::delete_rating_draft(self, request, task_id, student_id, solution_id).await
    }
}

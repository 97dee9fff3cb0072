use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::UserRole;
use crate::models::solutions::requests::{
    PostSolutionRequest, RateEmptySolutionRequest, RateSolutionRequest, RatingDraftQuery,
    UnratedSolutionsQuery,
};
use crate::rating::draft::RatingDraft;
use crate::services::solutions::SolutionService;

// 懒加载的全局 SOLUTION_SERVICE 实例
static SOLUTION_SERVICE: Lazy<SolutionService> = Lazy::new(SolutionService::new_lazy);

// HTTP处理程序
pub async fn get_solution(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE.get_solution(&req, path.into_inner()).await
}

pub async fn task_solution_page(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (task_id, student_id) = path.into_inner();
    SOLUTION_SERVICE
        .task_solution_page(&req, task_id, student_id)
        .await
}

pub async fn task_statistics_page(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .task_statistics_page(&req, path.into_inner())
        .await
}

pub async fn post_solution(
    req: HttpRequest,
    path: web::Path<i64>,
    solution_data: web::Json<PostSolutionRequest>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .post_solution(&req, path.into_inner(), solution_data.into_inner())
        .await
}

pub async fn rate_solution(
    req: HttpRequest,
    path: web::Path<i64>,
    rate_data: web::Json<RateSolutionRequest>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .rate_solution(&req, path.into_inner(), rate_data.into_inner())
        .await
}

pub async fn rate_empty_solution(
    req: HttpRequest,
    path: web::Path<i64>,
    rate_data: web::Json<RateEmptySolutionRequest>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .rate_empty_solution(&req, path.into_inner(), rate_data.into_inner())
        .await
}

pub async fn give_up(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE.give_up(&req, path.into_inner()).await
}

pub async fn mark_solution_final(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .mark_solution_final(&req, path.into_inner())
        .await
}

pub async fn delete_solution(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .delete_solution(&req, path.into_inner())
        .await
}

pub async fn unrated_solutions(
    req: HttpRequest,
    query: web::Query<UnratedSolutionsQuery>,
) -> ActixResult<HttpResponse> {
    SOLUTION_SERVICE
        .unrated_solutions(&req, query.into_inner())
        .await
}

pub async fn get_rating_draft(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<RatingDraftQuery>,
) -> ActixResult<HttpResponse> {
    let (task_id, student_id) = path.into_inner();
    SOLUTION_SERVICE
        .get_rating_draft(&req, task_id, student_id, query.solution_id)
        .await
}

pub async fn put_rating_draft(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<RatingDraftQuery>,
    draft: web::Json<RatingDraft>,
) -> ActixResult<HttpResponse> {
    let (task_id, student_id) = path.into_inner();
    SOLUTION_SERVICE
        .put_rating_draft(&req, task_id, student_id, query.solution_id, draft.into_inner())
        .await
}

pub async fn delete_rating_draft(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<RatingDraftQuery>,
) -> ActixResult<HttpResponse> {
    let (task_id, student_id) = path.into_inner();
    SOLUTION_SERVICE
        .delete_rating_draft(&req, task_id, student_id, query.solution_id)
        .await
}

// 配置路由，字面量路径必须排在 /{solution_id} 之前
pub fn configure_solutions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/solutions")
            .wrap(middlewares::RequireJWT)
            // 未评分解答摘要（讲师）
            .service(
                web::resource("/unratedSolutions")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::get().to(unrated_solutions)),
            )
            // 学生解答页数据
            .service(
                web::resource("/taskSolution/{task_id}/{student_id}")
                    .route(web::get().to(task_solution_page)),
            )
            // 讲师任务统计页数据（讲师）
            .service(
                web::resource("/tasks/{task_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::get().to(task_statistics_page)),
            )
            // 空解答评分（讲师）
            .service(
                web::resource("/rateEmptySolution/{task_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(rate_empty_solution)),
            )
            // 学生放弃任务
            .service(
                web::resource("/giveUp/{task_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route(web::post().to(give_up)),
            )
            // 评分（讲师）
            .service(
                web::resource("/rateSolution/{solution_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(rate_solution)),
            )
            // 解答定稿（讲师）
            .service(
                web::resource("/markSolutionFinal/{solution_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::post().to(mark_solution_final)),
            )
            // 删除解答，提交者或导师，细粒度校验在服务层
            .service(
                web::resource("/delete/{solution_id}").route(web::delete().to(delete_solution)),
            )
            // 评分草稿（讲师）
            .service(
                web::resource("/ratingDraft/{task_id}/{student_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
                    .route(web::get().to(get_rating_draft))
                    .route(web::put().to(put_rating_draft))
                    .route(web::delete().to(delete_rating_draft)),
            )
            // 获取单个解答 / 提交解答（提交仅限学生，角色门挂在 POST 路由上）
            .service(
                web::resource("/{solution_id}")
                    .route(web::get().to(get_solution))
                    .route(
                        web::post()
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                            .to(post_solution),
                    ),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AuthService;
use crate::models::ApiResponse;

/// 注销：失效当前 access token 对应的用户缓存。
/// 令牌本身无状态，由过期时间兜底。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);

    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    {
        cache.remove(&format!("user:{token}")).await;
        debug!("User cache evicted on logout");
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Logged out")))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::auth::{requests::RefreshTokenRequest, responses::LoginResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
    refresh_request: RefreshTokenRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 验证 refresh token
    let claims = match JwtUtils::verify_refresh_token(&refresh_request.refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token validation failed: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid or expired refresh token",
            )));
        }
    };

    let user_id = match claims.sub.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid refresh token subject",
            )));
        }
    };

    // 2. 确认用户仍然存在
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User no longer exists",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to fetch user for token refresh: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error during token refresh",
                )),
            );
        }
    };

    // 3. 签发新令牌对
    match JwtUtils::generate_token_pair(user.id, &user.role.to_string()) {
        Ok(token_pair) => {
            let response = LoginResponse {
                access_token: token_pair.access_token,
                refresh_token: token_pair.refresh_token,
                user: user.to_account_data(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Token refreshed")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to generate tokens",
                )),
            )
        }
    }
}

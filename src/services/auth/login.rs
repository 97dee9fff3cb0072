use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据邮箱获取用户及密码哈希
    match storage.get_user_credentials(&login_request.email).await {
        Ok(Some((user, password_hash))) => {
            // 2. 验证密码
            if !verify_password(&login_request.password, &password_hash) {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::InvalidCredentials,
                    "Invalid email or password",
                )));
            }

            // 3. 更新最后登录时间
            let _ = storage.update_last_login(user.id).await;

            // 4. 生成令牌对
            match JwtUtils::generate_token_pair(user.id, &user.role.to_string()) {
                Ok(token_pair) => {
                    info!("User {} logged in successfully", user.email);
                    let response = LoginResponse {
                        access_token: token_pair.access_token,
                        refresh_token: token_pair.refresh_token,
                        user: user.to_account_data(),
                    };
                    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
                }
                Err(e) => {
                    error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Failed to generate tokens",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::InvalidCredentials,
            "Invalid email or password",
        ))),
        Err(e) => {
            error!("Failed to fetch user credentials: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error during login",
                )),
            )
        }
    }
}

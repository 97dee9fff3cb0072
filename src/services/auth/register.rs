use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::accounts::entities::UserRole;
use crate::models::auth::requests::RegisterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::CreateUserData;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    register_request: RegisterRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 参数校验
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if register_request.name.trim().is_empty() || register_request.surname.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Name and surname must not be empty",
        )));
    }

    // 2. 邮箱唯一性
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email is already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email uniqueness: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking email",
                )),
            );
        }
    }

    // 3. 哈希密码并落库
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while hashing password",
                )),
            );
        }
    };

    let user_data = CreateUserData {
        email: register_request.email,
        password_hash,
        name: register_request.name,
        surname: register_request.surname,
        middle_name: register_request.middle_name,
        role: register_request.role.unwrap_or(UserRole::Student),
        is_external_auth: false,
    };

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} registered successfully", user.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                user.to_account_data(),
                "Registration successful",
            )))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            )
        }
    }
}

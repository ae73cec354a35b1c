use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::users::{UserFieldError, validate_user_fields};
use crate::services::{current_user, invalidate_cached_user};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current_user = current_user(request)?;

    if let Err(UserFieldError { code, message }) = validate_user_fields(
        update_data.email.as_deref(),
        update_data.phone_number.as_deref(),
        update_data.first_name.as_deref(),
        update_data.last_name.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)));
    }

    // 新邮箱不能被其他用户占用
    if let Some(ref email) = update_data.email
        && let Ok(Some(existing_user)) = storage.get_user_by_email(email).await
        && existing_user.id != current_user.id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        )));
    }

    let hashed_password = match update_data.password {
        Some(ref password) => {
            if let Err(msg) = validate_password_simple(password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Password hashing failed: {e}"),
                        )),
                    );
                }
            }
        }
        None => None,
    };

    // 不包含角色与状态
    let storage_update = UpdateUserRequest {
        email: update_data.email,
        password: hashed_password,
        role: None,
        status: None,
        first_name: update_data.first_name,
        last_name: update_data.last_name,
        phone_number: update_data.phone_number,
        date_of_birth: update_data.date_of_birth,
        address: update_data.address,
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            invalidate_cached_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserUpdateFailed,
            format!("Failed to update profile: {e}"),
        ))),
    }
}

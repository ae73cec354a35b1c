use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserFieldError, UserService, validate_user_fields};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{UserRole, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::invalidate_cached_user;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(UserFieldError { code, message }) = validate_user_fields(
        update_data.email.as_deref(),
        update_data.phone_number.as_deref(),
        update_data.first_name.as_deref(),
        update_data.last_name.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)));
    }

    let storage = service.get_storage(request)?;

    if let Some(ref email) = update_data.email
        && let Ok(Some(existing)) = storage.get_user_by_email(email).await
        && existing.id != user_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        )));
    }

    // 已有档案的用户不能改成与档案不符的角色
    if let Some(ref role) = update_data.role {
        let has_student_profile = *role != UserRole::Student
            && matches!(storage.get_student_profile_by_user_id(user_id).await, Ok(Some(_)));
        let has_teacher_profile = *role != UserRole::Teacher
            && matches!(storage.get_teacher_profile_by_user_id(user_id).await, Ok(Some(_)));
        if has_student_profile || has_teacher_profile {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ProfileRoleMismatch,
                "Role conflicts with the user's existing profile",
            )));
        }
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
        }
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
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

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            invalidate_cached_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserUpdateFailed,
            format!("Failed to update user information: {e}"),
        ))),
    }
}

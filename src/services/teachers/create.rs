use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherService, validate_teacher_fields};
use crate::models::teachers::requests::CreateTeacherProfileRequest;
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    mut profile_data: CreateTeacherProfileRequest,
) -> ActixResult<HttpResponse> {
    profile_data.employee_id = profile_data.employee_id.trim().to_string();

    if let Err(msg) = validate_teacher_fields(
        Some(&profile_data.employee_id),
        Some(&profile_data.specialization),
        Some(profile_data.experience_years),
        profile_data.salary,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    let user = match storage.get_user_by_id(profile_data.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Err(internal_error("Failed to load user", e)),
    };
    if user.role != UserRole::Teacher {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileRoleMismatch,
            "Only users with the teacher role can have a teacher profile",
        )));
    }

    if let Ok(Some(_)) = storage.get_teacher_profile_by_user_id(user.id).await {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherProfileAlreadyExists,
            "User already has a teacher profile",
        )));
    }
    if let Ok(Some(_)) = storage
        .get_teacher_profile_by_employee_id(&profile_data.employee_id)
        .await
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherProfileAlreadyExists,
            "Employee ID already exists",
        )));
    }

    match storage.create_teacher_profile(profile_data).await {
        Ok(profile) => {
            info!(
                "Teacher profile {} created for user {}",
                profile.employee_id, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                profile,
                "Teacher profile created successfully",
            )))
        }
        Err(e) => {
            error!("Teacher profile creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Teacher profile creation failed: {e}"),
                )),
            )
        }
    }
}

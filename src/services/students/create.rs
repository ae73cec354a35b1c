use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, ensure_class_has_room, validate_student_fields};
use crate::models::students::requests::CreateStudentProfileRequest;
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut profile_data: CreateStudentProfileRequest,
) -> ActixResult<HttpResponse> {
    profile_data.student_number = profile_data.student_number.trim().to_string();

    if let Err(msg) = validate_student_fields(
        Some(&profile_data.student_number),
        Some(&profile_data.guardian_name),
        Some(&profile_data.guardian_phone),
        profile_data.guardian_email.as_deref(),
        Some(&profile_data.emergency_contact),
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
    if user.role != UserRole::Student {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileRoleMismatch,
            "Only users with the student role can have a student profile",
        )));
    }

    if let Ok(Some(_)) = storage.get_student_profile_by_user_id(user.id).await {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentProfileAlreadyExists,
            "User already has a student profile",
        )));
    }
    if let Ok(Some(_)) = storage
        .get_student_profile_by_number(&profile_data.student_number)
        .await
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentProfileAlreadyExists,
            "Student ID already exists",
        )));
    }

    if let Some(class_id) = profile_data.class_id {
        ensure_class_has_room(&storage, class_id).await?;
    }

    match storage.create_student_profile(profile_data).await {
        Ok(profile) => {
            info!(
                "Student profile {} created for user {}",
                profile.student_number, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                profile,
                "Student profile created successfully",
            )))
        }
        Err(e) => {
            error!("Student profile creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Student profile creation failed: {e}"),
                )),
            )
        }
    }
}

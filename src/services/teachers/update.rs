use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, validate_teacher_fields};
use crate::models::{ApiResponse, ErrorCode, teachers::requests::UpdateTeacherProfileRequest};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    mut update_data: UpdateTeacherProfileRequest,
) -> ActixResult<HttpResponse> {
    update_data.employee_id = update_data.employee_id.map(|id| id.trim().to_string());

    if let Err(msg) = validate_teacher_fields(
        update_data.employee_id.as_deref(),
        update_data.specialization.as_deref(),
        update_data.experience_years,
        update_data.salary,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    if let Some(ref employee_id) = update_data.employee_id
        && let Ok(Some(existing)) = storage.get_teacher_profile_by_employee_id(employee_id).await
        && existing.id != teacher_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherProfileAlreadyExists,
            "Employee ID already exists",
        )));
    }

    match storage.update_teacher_profile(teacher_id, update_data).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Teacher profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherProfileNotFound,
            "Teacher profile not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileInvalid,
            format!("Teacher profile update failed: {e}"),
        ))),
    }
}

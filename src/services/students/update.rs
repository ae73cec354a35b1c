use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, ensure_class_has_room, validate_student_fields};
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentProfileRequest};
use crate::services::access::load_student_profile;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update_data: UpdateStudentProfileRequest,
) -> ActixResult<HttpResponse> {
    update_data.student_number = update_data.student_number.map(|n| n.trim().to_string());

    if let Err(msg) = validate_student_fields(
        update_data.student_number.as_deref(),
        update_data.guardian_name.as_deref(),
        update_data.guardian_phone.as_deref(),
        update_data.guardian_email.as_deref(),
        update_data.emergency_contact.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let profile = load_student_profile(&storage, student_id).await?;

    if let Some(ref number) = update_data.student_number
        && let Ok(Some(existing)) = storage.get_student_profile_by_number(number).await
        && existing.id != student_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentProfileAlreadyExists,
            "Student ID already exists",
        )));
    }

    // 仅在换班时检查目标班级容量
    if !update_data.clear_class
        && let Some(class_id) = update_data.class_id
        && profile.class_id != Some(class_id)
    {
        ensure_class_has_room(&storage, class_id).await?;
    }

    match storage.update_student_profile(student_id, update_data).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Student profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentProfileNotFound,
            "Student profile not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileInvalid,
            format!("Student profile update failed: {e}"),
        ))),
    }
}

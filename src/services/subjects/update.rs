use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_subject_fields};
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::access::load_subject;
use crate::services::internal_error;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    update_data.name = update_data.name.map(|n| n.trim().to_string());
    update_data.code = update_data.code.map(|c| c.trim().to_string());

    if let Err(msg) = validate_subject_fields(
        update_data.name.as_deref(),
        update_data.code.as_deref(),
        update_data.description.as_deref(),
        update_data.credits,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, subject_id).await?;

    if let Some(class_id) = update_data.class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    "Class not found",
                )));
            }
            Err(e) => return Err(internal_error("Failed to load class", e)),
        }
    }

    if !update_data.clear_teacher
        && let Some(teacher_id) = update_data.teacher_id
    {
        match storage.get_teacher_profile_by_id(teacher_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProfileNotFound,
                    "Teacher profile not found",
                )));
            }
            Err(e) => return Err(internal_error("Failed to load teacher", e)),
        }
    }

    if let Some(ref code) = update_data.code
        && let Ok(Some(existing)) = storage.get_subject_by_code(code).await
        && existing.id != subject_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject code already exists",
        )));
    }

    // (名称, 班级) 唯一，任一字段变化都要检查
    let name = update_data.name.as_deref().unwrap_or(&subject.name);
    let class_id = update_data.class_id.unwrap_or(subject.class_id);
    if let Ok(Some(existing)) = storage.get_subject_by_name_and_class(name, class_id).await
        && existing.id != subject_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject with this name already exists in the class",
        )));
    }

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectUpdateFailed,
            format!("Subject update failed: {e}"),
        ))),
    }
}

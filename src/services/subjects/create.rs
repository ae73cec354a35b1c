use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{SubjectService, validate_subject_fields};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    subject_data.name = subject_data.name.trim().to_string();
    subject_data.code = subject_data.code.trim().to_string();

    if let Err(msg) = validate_subject_fields(
        Some(&subject_data.name),
        Some(&subject_data.code),
        subject_data.description.as_deref(),
        subject_data.credits,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(subject_data.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Err(crate::services::internal_error("Failed to load class", e)),
    }

    if let Some(teacher_id) = subject_data.teacher_id {
        match storage.get_teacher_profile_by_id(teacher_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProfileNotFound,
                    "Teacher profile not found",
                )));
            }
            Err(e) => {
                return Err(crate::services::internal_error("Failed to load teacher", e));
            }
        }
    }

    if let Ok(Some(_)) = storage.get_subject_by_code(&subject_data.code).await {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject code already exists",
        )));
    }

    if let Ok(Some(_)) = storage
        .get_subject_by_name_and_class(&subject_data.name, subject_data.class_id)
        .await
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject with this name already exists in the class",
        )));
    }

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.name, subject.code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => {
            error!("Subject creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SubjectCreationFailed,
                    format!("Subject creation failed: {e}"),
                )),
            )
        }
    }
}

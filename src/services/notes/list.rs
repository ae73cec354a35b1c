use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoteService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_student_profile, load_student_profile};
use crate::services::current_user;

pub async fn list_student_notes(
    service: &NoteService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = load_student_profile(&storage, student_id).await?;

    match storage.list_student_notes(student.id, true).await {
        Ok(notes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notes,
            "Notes retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve notes: {e}"),
            )),
        ),
    }
}

pub async fn list_my_notes(service: &NoteService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;

    match storage.list_student_notes(student.id, false).await {
        Ok(notes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notes,
            "Notes retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve notes: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NoteService, validate_note};
use crate::models::notes::CreateNoteRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::load_student_profile;
use crate::services::current_user;

pub async fn create_note(
    service: &NoteService,
    request: &HttpRequest,
    student_id: i64,
    mut note_data: CreateNoteRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    note_data.title = note_data.title.trim().to_string();

    if let Err(msg) = validate_note(&note_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::NoteInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let student = load_student_profile(&storage, student_id).await?;

    match storage.create_note(student.id, user.id, note_data).await {
        Ok(note) => {
            info!(
                "Note {} added to student {} by {}",
                note.id, student.student_number, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(note, "Note created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Note creation failed: {e}"),
            )),
        ),
    }
}

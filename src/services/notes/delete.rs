use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoteService;
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn delete_note(
    service: &NoteService,
    request: &HttpRequest,
    note_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let note = match storage.get_note_by_id(note_id).await {
        Ok(Some(note)) => note,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NoteNotFound,
                "Note not found",
            )));
        }
        Err(e) => return Err(internal_error("Failed to load note", e)),
    };

    // 作者或管理员
    if note.created_by != user.id && user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the author or an administrator can delete this note",
        )));
    }

    match storage.delete_note(note_id).await {
        Ok(true) => {
            info!("Note {} deleted by {}", note_id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Note deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoteNotFound,
            "Note not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Note deletion failed: {e}"),
            )),
        ),
    }
}

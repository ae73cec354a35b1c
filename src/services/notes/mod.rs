pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notes::CreateNoteRequest;
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

pub const MAX_NOTE_TITLE_LENGTH: usize = 200;
pub const MAX_NOTE_CONTENT_LENGTH: usize = 10_000;

pub struct NoteService {
    storage: Option<Arc<dyn Storage>>,
}

pub fn validate_note(note: &CreateNoteRequest) -> Result<(), String> {
    validate_required_text(&note.title, "Title", MAX_NOTE_TITLE_LENGTH)?;
    validate_required_text(&note.content, "Content", MAX_NOTE_CONTENT_LENGTH)
}

impl NoteService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn create_note(
        &self,
        request: &HttpRequest,
        student_id: i64,
        note_data: CreateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_note(self, request, student_id, note_data).await
    }

    /// 教师与管理员可见全部备注
    pub async fn list_student_notes(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_notes(self, request, student_id).await
    }

    /// 学生仅可见非私密备注
    pub async fn list_my_notes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_notes(self, request).await
    }

    pub async fn delete_note(&self, request: &HttpRequest, note_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_note(self, request, note_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            is_private: false,
        }
    }

    #[test]
    fn test_validate_note() {
        assert!(validate_note(&note("Behaviour", "Helped a classmate")).is_ok());
        assert_eq!(
            validate_note(&note("  ", "x")).unwrap_err(),
            "Title must not be empty"
        );
        assert_eq!(
            validate_note(&note("Title", "")).unwrap_err(),
            "Content must not be empty"
        );
    }
}

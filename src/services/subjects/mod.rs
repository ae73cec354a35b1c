pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod students;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::entities::{MAX_CREDITS, MIN_CREDITS};
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectQueryParams, UpdateSubjectRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_max_length, validate_required_text};

pub const MAX_SUBJECT_NAME_LENGTH: usize = 100;
pub const MAX_SUBJECT_CODE_LENGTH: usize = 20;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

pub fn validate_subject_fields(
    name: Option<&str>,
    code: Option<&str>,
    description: Option<&str>,
    credits: Option<i32>,
) -> Result<(), String> {
    if let Some(name) = name {
        validate_required_text(name, "Subject name", MAX_SUBJECT_NAME_LENGTH)?;
    }
    if let Some(code) = code {
        validate_required_text(code, "Subject code", MAX_SUBJECT_CODE_LENGTH)?;
    }
    if let Some(description) = description {
        validate_max_length(description, "Description", 2000)?;
    }
    if let Some(credits) = credits
        && !(MIN_CREDITS..=MAX_CREDITS).contains(&credits)
    {
        return Err(format!(
            "Credits must be between {MIN_CREDITS} and {MAX_CREDITS}"
        ));
    }
    Ok(())
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: SubjectQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, query).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject_data: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, subject_data).await
    }

    pub async fn get_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, subject_id).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        update_data: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, request, subject_id, update_data).await
    }

    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, request, subject_id).await
    }

    // 科目的在读学生
    pub async fn list_subject_students(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::list_subject_students(self, request, subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subject_fields() {
        assert!(validate_subject_fields(Some("Physics"), Some("PHY101"), None, Some(4)).is_ok());
        assert_eq!(
            validate_subject_fields(None, Some(""), None, None).unwrap_err(),
            "Subject code must not be empty"
        );
        assert_eq!(
            validate_subject_fields(None, Some(&"C".repeat(21)), None, None).unwrap_err(),
            "Subject code must be at most 20 characters"
        );
        assert_eq!(
            validate_subject_fields(None, None, None, Some(11)).unwrap_err(),
            "Credits must be between 1 and 10"
        );
    }
}

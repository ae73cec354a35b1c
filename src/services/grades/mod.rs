pub mod create;
pub mod delete;
pub mod list;
pub mod me;
pub mod report;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{internal_error, json_error};
use crate::models::ErrorCode;
use crate::models::grades::Grade;
use crate::models::grades::calculation::validate_marks;
use crate::models::grades::requests::{CreateGradeRequest, GradeQueryParams, UpdateGradeRequest};
use crate::storage::Storage;
use crate::utils::validate::{validate_max_length, validate_required_text};

pub const MAX_GRADE_TITLE_LENGTH: usize = 200;
pub const MAX_COMMENTS_LENGTH: usize = 2000;
pub const DUPLICATE_GRADE_MESSAGE: &str =
    "A grade with this title and type already exists for the student";

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

/// 成绩字段校验，分数需已合并为最终值
pub fn validate_grade_fields(
    title: Option<&str>,
    comments: Option<&str>,
    marks_obtained: f64,
    total_marks: f64,
) -> Result<(), String> {
    if let Some(title) = title {
        validate_required_text(title, "Title", MAX_GRADE_TITLE_LENGTH)?;
    }
    if let Some(comments) = comments {
        validate_max_length(comments, "Comments", MAX_COMMENTS_LENGTH)?;
    }
    validate_marks(marks_obtained, total_marks).map_err(str::to_string)
}

pub(crate) async fn load_grade(storage: &Arc<dyn Storage>, grade_id: i64) -> ActixResult<Grade> {
    match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => Ok(grade),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            ErrorCode::GradeNotFound,
            "Grade not found",
        )),
        Err(e) => Err(internal_error("Failed to load grade", e)),
    }
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    pub async fn list_subject_grades(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        query: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subject_grades(self, request, subject_id, query).await
    }

    pub async fn subject_report(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::subject_report(self, request, subject_id).await
    }

    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update_data).await
    }

    pub async fn delete_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }

    pub async fn get_my_grades(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_grades(self, request).await
    }

    pub async fn get_my_subject_grades(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        me::get_my_subject_grades(self, request, subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grade_fields() {
        assert!(validate_grade_fields(Some("Midterm"), None, 45.0, 50.0).is_ok());
        assert_eq!(
            validate_grade_fields(Some(""), None, 1.0, 2.0).unwrap_err(),
            "Title must not be empty"
        );
        assert_eq!(
            validate_grade_fields(Some(&"t".repeat(201)), None, 1.0, 2.0).unwrap_err(),
            "Title must be at most 200 characters"
        );
        assert_eq!(
            validate_grade_fields(None, None, 51.0, 50.0).unwrap_err(),
            "Marks obtained cannot exceed total marks"
        );
        assert_eq!(
            validate_grade_fields(None, None, 10.0, 0.0).unwrap_err(),
            "Total marks must be greater than 0"
        );
    }
}

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod me;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{internal_error, json_error};
use crate::models::ErrorCode;
use crate::models::students::requests::{
    CreateStudentProfileRequest, StudentListParams, UpdateStudentProfileRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_phone, validate_required_text};

pub const MAX_STUDENT_NUMBER_LENGTH: usize = 20;
pub const MAX_GUARDIAN_NAME_LENGTH: usize = 100;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 学生档案字段校验，未提供的字段跳过
pub fn validate_student_fields(
    student_number: Option<&str>,
    guardian_name: Option<&str>,
    guardian_phone: Option<&str>,
    guardian_email: Option<&str>,
    emergency_contact: Option<&str>,
) -> Result<(), String> {
    if let Some(number) = student_number {
        validate_required_text(number, "Student ID", MAX_STUDENT_NUMBER_LENGTH)?;
    }
    if let Some(name) = guardian_name {
        validate_required_text(name, "Guardian name", MAX_GUARDIAN_NAME_LENGTH)?;
    }
    if let Some(phone) = guardian_phone {
        validate_phone(phone).map_err(|msg| format!("Guardian phone: {msg}"))?;
    }
    if let Some(email) = guardian_email
        && !email.is_empty()
    {
        validate_email(email).map_err(|msg| format!("Guardian email: {msg}"))?;
    }
    if let Some(contact) = emergency_contact {
        validate_phone(contact).map_err(|msg| format!("Emergency contact: {msg}"))?;
    }
    Ok(())
}

/// 班级存在且未满员
pub(crate) async fn ensure_class_has_room(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> ActixResult<()> {
    let detail = match storage.get_class_detail(class_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Err(json_error(
                StatusCode::NOT_FOUND,
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Err(internal_error("Failed to load class", e)),
    };
    if detail.is_full() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            ErrorCode::ClassCapacityExceeded,
            format!(
                "Class {} is full ({} students)",
                detail.class.name, detail.class.capacity
            ),
        ));
    }
    Ok(())
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        profile_data: CreateStudentProfileRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, profile_data).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    pub async fn get_my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_profile(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_student_fields() {
        assert!(
            validate_student_fields(
                Some("S2024001"),
                Some("Jane Doe"),
                Some("+15551234567"),
                Some("jane@example.com"),
                Some("5559876543"),
            )
            .is_ok()
        );
        assert_eq!(
            validate_student_fields(Some(&"9".repeat(21)), None, None, None, None).unwrap_err(),
            "Student ID must be at most 20 characters"
        );
        assert!(
            validate_student_fields(None, None, Some("not-a-phone"), None, None)
                .unwrap_err()
                .starts_with("Guardian phone")
        );
        // 空邮箱表示不填
        assert!(validate_student_fields(None, None, None, Some(""), None).is_ok());
    }
}

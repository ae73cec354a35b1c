pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod me;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    CreateTeacherProfileRequest, TeacherListParams, UpdateTeacherProfileRequest,
};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

pub const MAX_EMPLOYEE_ID_LENGTH: usize = 20;
pub const MAX_SPECIALIZATION_LENGTH: usize = 100;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

pub fn validate_teacher_fields(
    employee_id: Option<&str>,
    specialization: Option<&str>,
    experience_years: Option<i32>,
    salary: Option<f64>,
) -> Result<(), String> {
    if let Some(id) = employee_id {
        validate_required_text(id, "Employee ID", MAX_EMPLOYEE_ID_LENGTH)?;
    }
    if let Some(specialization) = specialization {
        validate_required_text(specialization, "Specialization", MAX_SPECIALIZATION_LENGTH)?;
    }
    if let Some(years) = experience_years
        && years < 0
    {
        return Err("Experience years must not be negative".to_string());
    }
    if let Some(salary) = salary
        && !(salary.is_finite() && salary >= 0.0)
    {
        return Err("Salary must be a non-negative amount".to_string());
    }
    Ok(())
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        query: TeacherListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, query).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        profile_data: CreateTeacherProfileRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, profile_data).await
    }

    pub async fn get_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, teacher_id).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        update_data: UpdateTeacherProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, teacher_id, update_data).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, teacher_id).await
    }

    // 教师本人视图不含薪资
    pub async fn get_my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_profile(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_teacher_fields() {
        assert!(validate_teacher_fields(Some("T-001"), Some("Physics"), Some(3), Some(0.0)).is_ok());
        assert_eq!(
            validate_teacher_fields(None, None, Some(-1), None).unwrap_err(),
            "Experience years must not be negative"
        );
        assert!(validate_teacher_fields(None, None, None, Some(-10.0)).is_err());
        assert!(validate_teacher_fields(None, None, None, Some(f64::NAN)).is_err());
        assert_eq!(
            validate_teacher_fields(Some(" "), None, None, None).unwrap_err(),
            "Employee ID must not be empty"
        );
    }
}

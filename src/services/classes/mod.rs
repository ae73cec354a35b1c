pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::entities::{MAX_CLASS_CAPACITY, MIN_CLASS_CAPACITY};
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

pub const MAX_CLASS_NAME_LENGTH: usize = 50;
pub const MAX_ACADEMIC_YEAR_LENGTH: usize = 20;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

/// 校验班级字段，None 表示不修改
pub fn validate_class_fields(
    name: Option<&str>,
    academic_year: Option<&str>,
    capacity: Option<i32>,
) -> Result<(), String> {
    if let Some(name) = name {
        validate_required_text(name, "Class name", MAX_CLASS_NAME_LENGTH)?;
    }
    if let Some(year) = academic_year {
        validate_required_text(year, "Academic year", MAX_ACADEMIC_YEAR_LENGTH)?;
    }
    if let Some(capacity) = capacity
        && !(MIN_CLASS_CAPACITY..=MAX_CLASS_CAPACITY).contains(&capacity)
    {
        return Err(format!(
            "Capacity must be between {MIN_CLASS_CAPACITY} and {MAX_CLASS_CAPACITY}"
        ));
    }
    Ok(())
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        req: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, req, class_data).await
    }

    // 班级详情（含学生数与科目数）
    pub async fn get_class(&self, req: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, req, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, req, class_id, update_data).await
    }

    // 删除班级，科目级联删除，学生移出班级
    pub async fn delete_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, req, class_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_class_fields() {
        assert!(validate_class_fields(Some("Grade 10A"), Some("2024-2025"), Some(30)).is_ok());
        assert!(validate_class_fields(None, None, None).is_ok());
        assert_eq!(
            validate_class_fields(Some("  "), None, None).unwrap_err(),
            "Class name must not be empty"
        );
        assert!(validate_class_fields(None, Some("Fall 2024"), None).is_ok());
        assert_eq!(
            validate_class_fields(None, Some(""), None).unwrap_err(),
            "Academic year must not be empty"
        );
        assert_eq!(
            validate_class_fields(None, Some(&"9".repeat(21)), None).unwrap_err(),
            "Academic year must be at most 20 characters"
        );
        assert_eq!(
            validate_class_fields(None, None, Some(0)).unwrap_err(),
            "Capacity must be between 1 and 100"
        );
        assert!(validate_class_fields(None, None, Some(101)).is_err());
    }
}

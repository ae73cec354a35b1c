pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_max_length, validate_phone};

pub const MAX_NAME_LENGTH: usize = 150;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

/// 用户字段校验失败
#[derive(Debug, PartialEq)]
pub struct UserFieldError {
    pub code: ErrorCode,
    pub message: String,
}

/// 校验可选的邮箱、电话与姓名字段
pub fn validate_user_fields(
    email: Option<&str>,
    phone_number: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<(), UserFieldError> {
    if let Some(email) = email {
        validate_email(email).map_err(|msg| UserFieldError {
            code: ErrorCode::UserEmailInvalid,
            message: msg.to_string(),
        })?;
    }
    // 空字符串表示清空
    if let Some(phone) = phone_number.filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|msg| UserFieldError {
            code: ErrorCode::UserPhoneInvalid,
            message: msg.to_string(),
        })?;
    }
    for (value, field) in [(first_name, "First name"), (last_name, "Last name")] {
        if let Some(value) = value {
            validate_max_length(value, field, MAX_NAME_LENGTH).map_err(|message| {
                UserFieldError {
                    code: ErrorCode::BadRequest,
                    message,
                }
            })?;
        }
    }
    Ok(())
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_fields() {
        assert!(validate_user_fields(Some("a@b.io"), Some("+1 555-0100"), None, None).is_ok());
        assert!(validate_user_fields(None, Some(""), None, None).is_ok());

        let err = validate_user_fields(Some("not-an-email"), None, None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailInvalid);

        let err = validate_user_fields(None, Some("+1234567890123456"), None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserPhoneInvalid);

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = validate_user_fields(None, None, Some(&long), None).unwrap_err();
        assert_eq!(err.message, "First name must be at most 150 characters");
    }
}

pub mod access;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboards;
pub mod enrollments;
pub mod grades;
pub mod notes;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, http::StatusCode, web,
};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::User};
use crate::storage::Storage;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboards::DashboardService;
pub use enrollments::EnrollmentService;
pub use grades::GradeService;
pub use notes::NoteService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use users::UserService;

/// 以统一响应体构造可用 `?` 传播的错误
pub(crate) fn json_error(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> actix_web::Error {
    let message = message.into();
    let response = HttpResponse::build(status).json(ApiResponse::error_empty(code, &message));
    InternalError::from_response(message, response).into()
}

/// 存储层错误统一记录并映射为 500
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> actix_web::Error {
    error!("{}: {}", context, err);
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    )
}

/// 服务未注入存储时从 app data 读取
pub(crate) fn storage_from_request(
    storage: Option<&Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = storage {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Storage not configured",
            )
        })
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 当前登录用户，由 RequireJWT 写入
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        json_error(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )
    })
}

/// 清除中间件缓存的用户信息
pub(crate) async fn invalidate_cached_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = cache_from_request(request) {
        cache
            .remove(&crate::middlewares::require_jwt::user_cache_key(user_id))
            .await;
    }
}

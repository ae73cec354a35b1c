use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::access::current_teacher_profile;
use crate::services::{current_user, internal_error};

pub async fn get_my_profile(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let profile = current_teacher_profile(&storage, &user).await?;

    match storage.get_teacher_detail(profile.id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail.without_salary(),
            "Teacher profile retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile.without_salary(),
            "Teacher profile retrieved successfully",
        ))),
        Err(e) => Err(internal_error("Failed to get teacher profile", e)),
    }
}

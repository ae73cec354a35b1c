use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::services::access::current_student_profile;
use crate::services::{current_user, internal_error};

pub async fn get_my_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let profile = current_student_profile(&storage, &user).await?;

    match storage.get_student_detail(profile.id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student profile retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Student profile retrieved successfully",
        ))),
        Err(e) => Err(internal_error("Failed to get student profile", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::enrollments::responses::EnrollmentOverview;
use crate::services::access::current_student_profile;
use crate::services::{current_user, internal_error};

pub async fn get_overview(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;

    let enrolled = storage
        .list_student_enrollments(student.id)
        .await
        .map_err(|e| internal_error("Failed to load enrollments", e))?;
    let available = storage
        .list_available_subjects(&student)
        .await
        .map_err(|e| internal_error("Failed to load available subjects", e))?;

    let overview = EnrollmentOverview::new(
        enrolled,
        available,
        AppConfig::get().max_active_enrollments(),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        overview,
        "Enrollment overview retrieved successfully",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::enrollments::policy::UnenrollmentOutcome;
use crate::models::enrollments::responses::EnrollmentActionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_student_profile, load_subject};
use crate::services::{current_user, internal_error};

pub async fn unenroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;
    let subject = load_subject(&storage, subject_id).await?;

    let outcome = storage
        .unenroll_student(student.id, &subject)
        .await
        .map_err(|e| internal_error("Error unenrolling from subject", e))?;

    let enrolled_count = storage
        .count_active_enrollments(student.id)
        .await
        .map_err(|e| internal_error("Failed to count enrollments", e))?;

    let message = outcome.message();
    let body = EnrollmentActionResponse {
        success: matches!(outcome, UnenrollmentOutcome::Unenrolled { .. }),
        message: message.clone(),
        enrolled_count,
    };

    match outcome {
        UnenrollmentOutcome::Unenrolled { .. } => {
            info!(
                "Student {} unenrolled from subject {}",
                student.student_number, subject.code
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(body, message)))
        }
        UnenrollmentOutcome::NotEnrolled => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error(ErrorCode::NotEnrolled, body, message),
        )),
        UnenrollmentOutcome::Mandatory => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error(ErrorCode::MandatorySubject, body, message),
        )),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::EnrollmentService;
use crate::config::AppConfig;
use crate::models::enrollments::policy::EnrollmentOutcome;
use crate::models::enrollments::responses::EnrollmentActionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_student_profile, load_subject};
use crate::services::{current_user, internal_error};

pub async fn enroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;
    let subject = load_subject(&storage, subject_id).await?;

    let outcome = match storage
        .enroll_student(&student, &subject, AppConfig::get().max_active_enrollments())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error(
                    ErrorCode::InternalServerError,
                    EnrollmentActionResponse {
                        success: false,
                        message: format!("Error enrolling in subject: {e}"),
                        enrolled_count: 0,
                    },
                    "Error enrolling in subject",
                )),
            );
        }
    };

    let enrolled_count = storage
        .count_active_enrollments(student.id)
        .await
        .map_err(|e| internal_error("Failed to count enrollments", e))?;

    let body = EnrollmentActionResponse {
        success: outcome.is_success(),
        message: outcome.message(),
        enrolled_count,
    };

    match outcome {
        EnrollmentOutcome::Enrolled(_) | EnrollmentOutcome::Reenrolled(_) => {
            info!(
                "Student {} enrolled in subject {}",
                student.student_number, subject.code
            );
            let message = body.message.clone();
            Ok(HttpResponse::Ok().json(ApiResponse::success(body, message)))
        }
        EnrollmentOutcome::Rejected(reason) => {
            warn!(
                "Enrollment of student {} in subject {} rejected: {}",
                student.student_number,
                subject.code,
                reason.message()
            );
            let message = body.message.clone();
            Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                reason.error_code(),
                body,
                message,
            )))
        }
    }
}

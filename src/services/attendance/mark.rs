use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AttendanceService, validate_attendance_batch};
use crate::models::attendance::requests::MarkAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::{current_user, internal_error};
use crate::utils::dates::today;

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mark_data: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    if let Err(msg) = validate_attendance_batch(mark_data.date, today(), &mark_data.records) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AttendanceInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, mark_data.subject_id).await?;
    let marked_by = authorize_subject_staff(&storage, &user, &subject).await?;

    // 整批中只要有未选课学生就全部拒绝
    let student_ids: Vec<i64> = mark_data.records.iter().map(|r| r.student_id).collect();
    let unenrolled = storage
        .find_unenrolled_students(subject.id, &student_ids)
        .await
        .map_err(|e| internal_error("Failed to check enrollments", e))?;
    if !unenrolled.is_empty() {
        let ids = unenrolled
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            format!("Students not enrolled in this subject: {ids}"),
        )));
    }

    match storage
        .mark_attendance(subject.id, mark_data.date, mark_data.records, marked_by)
        .await
    {
        Ok(response) => {
            info!(
                "Attendance for subject {} on {} marked by user {}: {} created, {} updated",
                subject.code, response.date, user.username, response.created, response.updated
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Attendance marked successfully",
            )))
        }
        Err(e) => {
            error!("Failed to mark attendance: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to mark attendance: {e}"),
                )),
            )
        }
    }
}

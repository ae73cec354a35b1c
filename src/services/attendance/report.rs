use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceReportParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::current_user;

pub async fn subject_report(
    service: &AttendanceService,
    request: &HttpRequest,
    subject_id: i64,
    params: AttendanceReportParams,
) -> ActixResult<HttpResponse> {
    if let (Some(from), Some(to)) = (params.date_from, params.date_to)
        && from > to
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "date_from must not be after date_to",
        )));
    }

    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, subject_id).await?;
    authorize_subject_staff(&storage, &user, &subject).await?;

    match storage
        .subject_attendance_report(subject.id, params.date_from, params.date_to)
        .await
    {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Attendance report generated successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to generate attendance report: {e}"),
            )),
        ),
    }
}

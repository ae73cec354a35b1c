use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::{AttendanceListQuery, AttendanceQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::current_user;

pub async fn list_subject_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    subject_id: i64,
    query: AttendanceQueryParams,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, subject_id).await?;
    authorize_subject_staff(&storage, &user, &subject).await?;

    match storage
        .list_attendance_with_pagination(AttendanceListQuery::for_subject(subject.id, query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance records retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance records: {e}"),
            )),
        ),
    }
}

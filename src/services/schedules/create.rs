use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_ROOM_NUMBER_LENGTH, ScheduleService, ensure_subject_taught_by, resolve_teacher_id};
use crate::models::schedules::{CreateScheduleRequest, validate_time_slot};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::validate_max_length;

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_data: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    if let Err(msg) = validate_time_slot(schedule_data.start_time, schedule_data.end_time) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, msg)));
    }
    if let Some(ref room) = schedule_data.room_number
        && let Err(msg) = validate_max_length(room, "Room number", MAX_ROOM_NUMBER_LENGTH)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let teacher_id = resolve_teacher_id(&storage, &user, schedule_data.teacher_id).await?;

    if let Some(subject_id) = schedule_data.subject_id {
        ensure_subject_taught_by(&storage, subject_id, teacher_id).await?;
    }

    if let Ok(Some(_)) = storage
        .find_schedule_slot(teacher_id, schedule_data.weekday, schedule_data.start_time)
        .await
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ScheduleConflict,
            "A schedule already starts at this time on this day",
        )));
    }

    match storage.create_schedule(teacher_id, schedule_data).await {
        Ok(schedule) => {
            info!(
                "Schedule {} created for teacher {} on {}",
                schedule.id, teacher_id, schedule.weekday
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                schedule,
                "Schedule created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Schedule creation failed: {e}"),
            )),
        ),
    }
}

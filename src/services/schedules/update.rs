use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MAX_ROOM_NUMBER_LENGTH, ScheduleService, ensure_subject_taught_by, load_owned_schedule};
use crate::models::schedules::{UpdateScheduleRequest, validate_time_slot};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::validate_max_length;

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    update_data: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let schedule = load_owned_schedule(&storage, &user, schedule_id).await?;

    let weekday = update_data.weekday.unwrap_or(schedule.weekday);
    let start_time = update_data.start_time.unwrap_or(schedule.start_time);
    let end_time = update_data.end_time.unwrap_or(schedule.end_time);

    if let Err(msg) = validate_time_slot(start_time, end_time) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, msg)));
    }
    if let Some(ref room) = update_data.room_number
        && let Err(msg) = validate_max_length(room, "Room number", MAX_ROOM_NUMBER_LENGTH)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, msg)));
    }

    if !update_data.clear_subject
        && let Some(subject_id) = update_data.subject_id
    {
        ensure_subject_taught_by(&storage, subject_id, schedule.teacher_id).await?;
    }

    if let Ok(Some(existing)) = storage
        .find_schedule_slot(schedule.teacher_id, weekday, start_time)
        .await
        && existing.id != schedule_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ScheduleConflict,
            "A schedule already starts at this time on this day",
        )));
    }

    match storage.update_schedule(schedule_id, update_data).await {
        Ok(Some(schedule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedule,
            "Schedule updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScheduleInvalid,
            format!("Schedule update failed: {e}"),
        ))),
    }
}

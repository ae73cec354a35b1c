use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::ScheduleQueryParams;
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::current_teacher_profile;
use crate::services::current_user;

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleQueryParams,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    // 教师只看自己的课表
    let teacher_id = if user.role == UserRole::Admin {
        query.teacher_id
    } else {
        Some(current_teacher_profile(&storage, &user).await?.id)
    };

    match storage.list_schedules(teacher_id, query.weekday).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedules,
            "Schedules retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve schedules: {e}"),
            )),
        ),
    }
}

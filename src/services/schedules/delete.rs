use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, load_owned_schedule};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    load_owned_schedule(&storage, &user, schedule_id).await?;

    match storage.delete_schedule(schedule_id).await {
        Ok(true) => {
            info!("Schedule {} deleted by {}", schedule_id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Schedule deletion failed: {e}"),
            )),
        ),
    }
}

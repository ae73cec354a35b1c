use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_teacher_profile(teacher_id).await {
        Ok(true) => {
            info!("Teacher profile {} deleted", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Teacher profile deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherProfileNotFound,
            "Teacher profile not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Teacher profile deletion failed: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, validate_class_fields};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    update_data.name = update_data.name.map(|n| n.trim().to_string());

    if let Err(msg) = validate_class_fields(
        update_data.name.as_deref(),
        update_data.academic_year.as_deref(),
        update_data.capacity,
    ) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg))
        );
    }

    let storage = service.get_storage(request)?;

    let detail = match storage.get_class_detail(class_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class information: {e}"),
                )),
            );
        }
    };

    if let Some(ref name) = update_data.name
        && let Ok(Some(existing)) = storage.get_class_by_name(name).await
        && existing.id != class_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassAlreadyExists,
            "Class name already exists",
        )));
    }

    // 容量不能低于现有学生数
    if let Some(capacity) = update_data.capacity
        && (capacity as u64) < detail.student_count
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassCapacityExceeded,
            format!(
                "Capacity cannot be lower than the current number of students ({})",
                detail.student_count
            ),
        )));
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassUpdateFailed,
            format!("Class update failed: {e}"),
        ))),
    }
}

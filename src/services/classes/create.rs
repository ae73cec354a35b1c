use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, validate_class_fields};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    class_data.name = class_data.name.trim().to_string();
    class_data.academic_year = class_data.academic_year.trim().to_string();

    if let Err(msg) = validate_class_fields(
        Some(&class_data.name),
        Some(&class_data.academic_year),
        class_data.capacity,
    ) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg))
        );
    }

    let storage = service.get_storage(request)?;

    // 班级名称全局唯一
    match storage.get_class_by_name(&class_data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                "Class name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check class name: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassCreationFailed,
                    format!("Class creation failed: {e}"),
                )),
            );
        }
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} created", class.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassCreationFailed,
                    format!("Class creation failed: {e}"),
                )),
            )
        }
    }
}

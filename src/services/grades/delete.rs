use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, load_grade};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::current_user;

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let grade = load_grade(&storage, grade_id).await?;
    let subject = load_subject(&storage, grade.subject_id).await?;
    authorize_subject_staff(&storage, &user, &subject).await?;

    match storage.delete_grade(grade_id).await {
        Ok(true) => {
            info!("Grade {} deleted by {}", grade_id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Grade deletion failed: {e}"),
            )),
        ),
    }
}

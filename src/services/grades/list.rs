use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::current_user;

pub async fn list_subject_grades(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
    query: GradeQueryParams,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, subject_id).await?;
    authorize_subject_staff(&storage, &user, &subject).await?;

    match storage
        .list_grades_with_pagination(GradeListQuery::for_subject(subject.id, query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve grade list: {e}"),
            )),
        ),
    }
}

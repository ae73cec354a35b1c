use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DUPLICATE_GRADE_MESSAGE, GradeService, load_grade, validate_grade_fields};
use crate::models::grades::entities::GradeView;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_subject};
use crate::services::{current_user, internal_error};

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
    mut update_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    update_data.title = update_data.title.map(|t| t.trim().to_string());

    let storage = service.get_storage(request)?;
    let grade = load_grade(&storage, grade_id).await?;
    let subject = load_subject(&storage, grade.subject_id).await?;
    let graded_by = authorize_subject_staff(&storage, &user, &subject).await?;

    // 校验合并后的分数
    if let Err(msg) = validate_grade_fields(
        update_data.title.as_deref(),
        update_data.comments.as_deref(),
        update_data.marks_obtained.unwrap_or(grade.marks_obtained),
        update_data.total_marks.unwrap_or(grade.total_marks),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeInvalid, msg)));
    }

    if update_data.title.is_some() || update_data.grade_type.is_some() {
        let title = update_data.title.as_deref().unwrap_or(&grade.title);
        let grade_type = update_data.grade_type.unwrap_or(grade.grade_type);
        match storage
            .find_grade(grade.student_id, grade.subject_id, title, grade_type)
            .await
        {
            Ok(Some(existing)) if existing.id != grade_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::GradeAlreadyExists,
                    DUPLICATE_GRADE_MESSAGE,
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(internal_error("Failed to check existing grades", e)),
        }
    }

    match storage.update_grade(grade_id, update_data, graded_by).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeView::from(grade),
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::GradeAlreadyExists, DUPLICATE_GRADE_MESSAGE),
        )),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeInvalid,
            format!("Grade update failed: {e}"),
        ))),
    }
}

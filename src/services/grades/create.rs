use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{DUPLICATE_GRADE_MESSAGE, GradeService, validate_grade_fields};
use crate::models::grades::entities::GradeView;
use crate::models::grades::requests::CreateGradeRequest;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{authorize_subject_staff, load_student_profile, load_subject};
use crate::services::{current_user, internal_error};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    mut grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    grade_data.title = grade_data.title.trim().to_string();

    if let Err(msg) = validate_grade_fields(
        Some(&grade_data.title),
        grade_data.comments.as_deref(),
        grade_data.marks_obtained,
        grade_data.total_marks,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeInvalid, msg)));
    }

    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, grade_data.subject_id).await?;
    let graded_by = authorize_subject_staff(&storage, &user, &subject).await?;
    let student = load_student_profile(&storage, grade_data.student_id).await?;

    match storage.get_enrollment(student.id, subject.id).await {
        Ok(Some(enrollment)) if enrollment.is_active => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "Student is not enrolled in this subject",
            )));
        }
        Err(e) => return Err(internal_error("Failed to check enrollment", e)),
    }

    match storage
        .find_grade(
            student.id,
            subject.id,
            &grade_data.title,
            grade_data.grade_type,
        )
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GradeAlreadyExists,
                DUPLICATE_GRADE_MESSAGE,
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(internal_error("Failed to check existing grades", e)),
    }

    match storage.create_grade(grade_data, graded_by).await {
        Ok(grade) => {
            info!(
                "Grade {} recorded for student {} in subject {}",
                grade.title, student.student_number, subject.code
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GradeView::from(grade),
                "Grade created successfully",
            )))
        }
        // 并发创建时由唯一索引兜底
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::GradeAlreadyExists, DUPLICATE_GRADE_MESSAGE),
        )),
        Err(e) => {
            error!("Grade creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Grade creation failed: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{HttpMessage, http::StatusCode, test::TestRequest};
    use std::sync::Arc;

    use crate::models::grades::GradeType;
    use crate::models::users::UserRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::tests::{
        date, seed_class, seed_student, seed_subject, seed_user,
    };

    fn midterm(student_id: i64, subject_id: i64) -> CreateGradeRequest {
        CreateGradeRequest {
            student_id,
            subject_id,
            grade_type: GradeType::Midterm,
            title: " Midterm ".to_string(),
            marks_obtained: 72.0,
            total_marks: 80.0,
            date_assigned: date(2025, 4, 14),
            date_submitted: None,
            comments: None,
            is_published: true,
        }
    }

    #[tokio::test]
    async fn test_create_grade_requires_enrollment_and_unique_key() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let admin = seed_user(&storage, "admin07", UserRole::Admin).await;
        let class_id = seed_class(&storage, "Grade 9C", 30).await;
        let subject = seed_subject(&storage, "BIO9", class_id, false, true).await;
        let student = seed_student(&storage, "pupil20", Some(class_id)).await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let service = GradeService {
            storage: Some(storage.clone()),
        };
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(admin);

        let not_enrolled = create_grade(&service, &request, midterm(student.id, subject.id))
            .await
            .unwrap();
        assert_eq!(not_enrolled.status(), StatusCode::BAD_REQUEST);

        storage.enroll_student(&student, &subject, 8).await.unwrap();

        let created = create_grade(&service, &request, midterm(student.id, subject.id))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let stored = storage
            .find_grade(student.id, subject.id, "Midterm", GradeType::Midterm)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.percentage, Some(90.0));

        let duplicate = create_grade(&service, &request, midterm(student.id, subject.id))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::entities::GradeView;
use crate::models::grades::responses::{StudentGradesOverview, SubjectGradeSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_student_profile, load_subject};
use crate::services::{current_user, internal_error};

/// 已选科目的已发布成绩汇总与 GPA
pub async fn get_my_grades(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;

    let enrolled = storage
        .list_student_enrollments(student.id)
        .await
        .map_err(|e| internal_error("Failed to load enrollments", e))?;
    let mut grades = storage
        .list_student_published_grades(student.id, None)
        .await
        .map_err(|e| internal_error("Failed to load grades", e))?;

    let mut subjects = Vec::with_capacity(enrolled.len());
    for item in &enrolled {
        let (own, rest): (Vec<_>, Vec<_>) = grades
            .into_iter()
            .partition(|g| g.subject_id == item.subject.id);
        grades = rest;
        if let Some(summary) = SubjectGradeSummary::build(&item.subject, own) {
            subjects.push(summary);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentGradesOverview::new(subjects),
        "Grades retrieved successfully",
    )))
}

pub async fn get_my_subject_grades(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;
    let subject = load_subject(&storage, subject_id).await?;

    match storage.get_enrollment(student.id, subject.id).await {
        Ok(Some(enrollment)) if enrollment.is_active => {}
        Ok(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You are not enrolled in this subject",
            )));
        }
        Err(e) => return Err(internal_error("Failed to check enrollment", e)),
    }

    match storage
        .list_student_published_grades(student.id, Some(subject.id))
        .await
    {
        Ok(grades) => {
            let views: Vec<GradeView> = grades.into_iter().map(GradeView::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                views,
                "Subject grades retrieved successfully",
            )))
        }
        Err(e) => Err(internal_error("Failed to load grades", e)),
    }
}

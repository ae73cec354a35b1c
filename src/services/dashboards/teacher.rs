use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use super::DashboardService;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::dashboards::{SubjectAttendanceToday, SubjectGradingOverview, TeacherDashboard};
use crate::services::access::{TEACHER_PROFILE_MISSING, current_teacher_profile};
use crate::services::{current_user, internal_error, json_error};
use crate::utils::dates::today;

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let profile = current_teacher_profile(&storage, &user).await?;

    let detail = match storage.get_teacher_detail(profile.id).await {
        Ok(Some(detail)) => detail.without_salary(),
        Ok(None) => {
            return Err(json_error(
                StatusCode::NOT_FOUND,
                ErrorCode::TeacherProfileNotFound,
                TEACHER_PROFILE_MISSING,
            ));
        }
        Err(e) => return Err(internal_error("Failed to load teacher profile", e)),
    };

    let subjects = storage
        .list_teacher_subjects(profile.id, true)
        .await
        .map_err(|e| internal_error("Failed to load subjects", e))?;

    let date = today();
    let mut total_students = 0;
    let mut attendance_today = Vec::with_capacity(subjects.len());
    let mut grading_overview = Vec::with_capacity(subjects.len());

    for subject in &subjects {
        let enrolled = storage
            .count_subject_enrollments(subject.id)
            .await
            .map_err(|e| internal_error("Failed to count enrollments", e))?;
        let (marked, present) = storage
            .count_subject_attendance_on(subject.id, date)
            .await
            .map_err(|e| internal_error("Failed to count attendance", e))?;
        let (total_grades, published_grades) = storage
            .count_subject_grades(subject.id)
            .await
            .map_err(|e| internal_error("Failed to count grades", e))?;

        total_students += enrolled;
        attendance_today.push(SubjectAttendanceToday::new(subject, enrolled, marked, present));
        grading_overview.push(SubjectGradingOverview {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            total_students: enrolled,
            total_grades,
            published_grades,
            pending_grades: total_grades.saturating_sub(published_grades),
        });
    }

    let dashboard = TeacherDashboard {
        profile: detail,
        subject_count: subjects.len() as u64,
        subjects,
        total_students,
        today: date,
        attendance_today,
        grading_overview,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Dashboard retrieved successfully",
    )))
}

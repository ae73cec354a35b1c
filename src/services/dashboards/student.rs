use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use chrono::Duration;

use super::DashboardService;
use crate::config::AppConfig;
use crate::models::attendance::AttendanceSummary;
use crate::models::dashboards::StudentDashboard;
use crate::models::enrollments::responses::EnrollmentOverview;
use crate::models::grades::gpa_from_percentages;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{STUDENT_PROFILE_MISSING, current_student_profile};
use crate::services::{current_user, internal_error, json_error};
use crate::utils::dates::today;

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let profile = current_student_profile(&storage, &user).await?;
    let config = AppConfig::get();

    let detail = match storage.get_student_detail(profile.id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Err(json_error(
                StatusCode::NOT_FOUND,
                ErrorCode::StudentProfileNotFound,
                STUDENT_PROFILE_MISSING,
            ));
        }
        Err(e) => return Err(internal_error("Failed to load student profile", e)),
    };

    let enrolled = storage
        .list_student_enrollments(profile.id)
        .await
        .map_err(|e| internal_error("Failed to load enrollments", e))?;
    let available = storage
        .list_available_subjects(&profile)
        .await
        .map_err(|e| internal_error("Failed to load available subjects", e))?;

    let since = today() - Duration::days(config.school.attendance_window_days);
    let records = storage
        .list_student_attendance(profile.id, Some(since))
        .await
        .map_err(|e| internal_error("Failed to load attendance", e))?;

    let grades = storage
        .list_student_published_grades(profile.id, None)
        .await
        .map_err(|e| internal_error("Failed to load grades", e))?;

    let dashboard = StudentDashboard {
        profile: detail,
        enrollment: EnrollmentOverview::new(enrolled, available, config.max_active_enrollments()),
        attendance: AttendanceSummary::from_statuses(records.iter().map(|r| &r.status)),
        gpa: gpa_from_percentages(grades.iter().map(|g| g.percentage)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Dashboard retrieved successfully",
    )))
}

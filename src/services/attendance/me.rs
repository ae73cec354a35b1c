use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Duration;

use super::AttendanceService;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::attendance::responses::{StudentAttendanceOverview, SubjectAttendance};
use crate::models::attendance::summary::AttendanceSummary;
use crate::services::access::current_student_profile;
use crate::services::{current_user, internal_error};
use crate::utils::dates::today;

const RECENT_RECORDS: usize = 10;

pub async fn get_my_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = current_student_profile(&storage, &user).await?;

    let window_days = AppConfig::get().school.attendance_window_days;
    let since = today() - Duration::days(window_days);

    let window_records = storage
        .list_student_attendance(student.id, Some(since))
        .await
        .map_err(|e| internal_error("Failed to load attendance", e))?;
    let all_records = storage
        .list_student_attendance(student.id, None)
        .await
        .map_err(|e| internal_error("Failed to load attendance", e))?;
    let enrolled = storage
        .list_student_enrollments(student.id)
        .await
        .map_err(|e| internal_error("Failed to load enrollments", e))?;

    let summary = AttendanceSummary::from_statuses(window_records.iter().map(|r| &r.status));

    // 分科统计覆盖已选科目的全部记录
    let subjects = enrolled
        .into_iter()
        .map(|item| {
            let subject = item.subject;
            let summary = AttendanceSummary::from_statuses(
                all_records
                    .iter()
                    .filter(|r| r.subject_id == subject.id)
                    .map(|r| &r.status),
            );
            SubjectAttendance {
                subject_id: subject.id,
                subject_name: subject.name,
                subject_code: subject.code,
                summary,
            }
        })
        .collect();

    let overview = StudentAttendanceOverview {
        window_days,
        summary,
        subjects,
        recent_records: window_records.into_iter().take(RECENT_RECORDS).collect(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        overview,
        "Attendance overview retrieved successfully",
    )))
}

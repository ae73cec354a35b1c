use serde::Serialize;
use ts_rs::TS;

use super::entities::Attendance;
use super::summary::AttendanceSummary;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<Attendance>,
    pub pagination: PaginationInfo,
}

/// 单科出勤
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct SubjectAttendance {
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub summary: AttendanceSummary,
}

/// 学生本人的出勤概览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct StudentAttendanceOverview {
    /// 最近 N 天
    pub window_days: i64,
    pub summary: AttendanceSummary,
    pub subjects: Vec<SubjectAttendance>,
    pub recent_records: Vec<Attendance>,
}

/// 科目考勤报表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct StudentAttendanceRow {
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceReport {
    pub subject_id: i64,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub rows: Vec<StudentAttendanceRow>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub created: u64,
    pub updated: u64,
    pub records: Vec<Attendance>,
}

use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// 按科目与日期批量记录考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub records: Vec<AttendanceEntry>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceReportParams {
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
}

// 用于存储层
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceListQuery {
    /// `date` 优先于区间
    pub fn for_subject(subject_id: i64, params: AttendanceQueryParams) -> Self {
        let (date_from, date_to) = match params.date {
            Some(date) => (Some(date), Some(date)),
            None => (params.date_from, params.date_to),
        };
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            subject_id: Some(subject_id),
            student_id: params.student_id,
            date_from,
            date_to,
            status: params.status,
        }
    }
}

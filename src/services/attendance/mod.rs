pub mod list;
pub mod mark;
pub mod me;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceEntry, AttendanceQueryParams, AttendanceReportParams, MarkAttendanceRequest,
};
use crate::storage::Storage;
use crate::utils::validate::validate_max_length;

pub const MAX_REMARKS_LENGTH: usize = 500;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

/// 批量考勤的基本校验：非空、不重复、不能是未来日期
pub fn validate_attendance_batch(
    date: NaiveDate,
    today: NaiveDate,
    records: &[AttendanceEntry],
) -> Result<(), String> {
    if records.is_empty() {
        return Err("Attendance records must not be empty".to_string());
    }
    if date > today {
        return Err("Cannot mark attendance for a future date".to_string());
    }
    let mut seen = HashSet::with_capacity(records.len());
    for entry in records {
        if !seen.insert(entry.student_id) {
            return Err(format!(
                "Duplicate attendance entry for student {}",
                entry.student_id
            ));
        }
        if let Some(ref remarks) = entry.remarks {
            validate_max_length(remarks, "Remarks", MAX_REMARKS_LENGTH)?;
        }
    }
    Ok(())
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        mark_data: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, mark_data).await
    }

    pub async fn list_subject_attendance(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        query: AttendanceQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subject_attendance(self, request, subject_id, query).await
    }

    pub async fn subject_report(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        params: AttendanceReportParams,
    ) -> ActixResult<HttpResponse> {
        report::subject_report(self, request, subject_id, params).await
    }

    pub async fn get_my_attendance(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_attendance(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;

    fn entry(student_id: i64) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status: AttendanceStatus::Present,
            remarks: None,
        }
    }

    #[test]
    fn test_validate_attendance_batch() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();

        assert!(validate_attendance_batch(today, today, &[entry(1), entry(2)]).is_ok());
        assert!(validate_attendance_batch(yesterday, today, &[entry(1)]).is_ok());
        assert_eq!(
            validate_attendance_batch(tomorrow, today, &[entry(1)]).unwrap_err(),
            "Cannot mark attendance for a future date"
        );
        assert_eq!(
            validate_attendance_batch(today, today, &[]).unwrap_err(),
            "Attendance records must not be empty"
        );
        assert_eq!(
            validate_attendance_batch(today, today, &[entry(3), entry(3)]).unwrap_err(),
            "Duplicate attendance entry for student 3"
        );
    }
}

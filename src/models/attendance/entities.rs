use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    #[derive(Default, TS)]
    #[ts(export, export_to = "school/attendance.ts")]
    pub enum AttendanceStatus ("attendance status") {
        Present => "present",
        #[default]
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

impl AttendanceStatus {
    /// 迟到也算出勤
    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    pub fn is_absent(&self) -> bool {
        *self == AttendanceStatus::Absent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    // 记录考勤的教师档案 ID
    pub marked_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Attendance {
    pub fn is_present(&self) -> bool {
        self.status.is_present()
    }

    pub fn is_absent(&self) -> bool {
        self.status.is_absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_rules() {
        assert!(AttendanceStatus::Present.is_present());
        assert!(AttendanceStatus::Late.is_present());
        assert!(!AttendanceStatus::Excused.is_present());
        assert!(!AttendanceStatus::Excused.is_absent());
        assert!(AttendanceStatus::Absent.is_absent());
    }

    #[test]
    fn test_default_status_is_absent() {
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Absent);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&AttendanceStatus::Late).unwrap(), "\"late\"");
        let parsed: AttendanceStatus = serde_json::from_str("\"excused\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Excused);
        assert!(serde_json::from_str::<AttendanceStatus>("\"sick\"").is_err());
    }
}

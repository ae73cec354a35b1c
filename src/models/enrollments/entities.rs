use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::Subject;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    // 学生档案 ID
    pub student_id: i64,
    pub subject_id: i64,
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 已选科目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/enrollment.ts")]
pub struct EnrolledSubject {
    pub enrollment: Enrollment,
    pub subject: Subject,
    /// 非必修才允许退选
    pub can_unenroll: bool,
}

impl EnrolledSubject {
    pub fn new(enrollment: Enrollment, subject: Subject) -> Self {
        let can_unenroll = !subject.is_mandatory;
        Self {
            enrollment,
            subject,
            can_unenroll,
        }
    }
}

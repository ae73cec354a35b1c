use serde::Serialize;
use ts_rs::TS;

use super::entities::EnrolledSubject;
use crate::models::subjects::Subject;

/// 选课概览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/enrollment.ts")]
pub struct EnrollmentOverview {
    pub enrolled_subjects: Vec<EnrolledSubject>,
    pub available_subjects: Vec<Subject>,
    pub total_enrolled: u64,
    pub max_subjects: u64,
    pub can_enroll_more: bool,
    pub enrollment_percentage: f64,
}

impl EnrollmentOverview {
    pub fn new(
        enrolled_subjects: Vec<EnrolledSubject>,
        available_subjects: Vec<Subject>,
        max_subjects: u64,
    ) -> Self {
        let total_enrolled = enrolled_subjects.len() as u64;
        Self {
            enrolled_subjects,
            available_subjects,
            total_enrolled,
            max_subjects,
            can_enroll_more: total_enrolled < max_subjects,
            enrollment_percentage: super::policy::enrollment_percentage(
                total_enrolled,
                max_subjects,
            ),
        }
    }
}

/// 选课/退选接口的返回体
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/enrollment.ts")]
pub struct EnrollmentActionResponse {
    pub success: bool,
    pub message: String,
    pub enrolled_count: u64,
}

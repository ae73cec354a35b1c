use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::AttendanceSummary;
use crate::models::enrollments::responses::EnrollmentOverview;
use crate::models::students::StudentDetail;
use crate::models::subjects::Subject;
use crate::models::teachers::TeacherDetail;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/dashboard.ts")]
pub struct AdminDashboard {
    pub total_users: u64,
    pub total_admins: u64,
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_classes: u64,
    pub total_subjects: u64,
    pub active_enrollments: u64,
}

/// 今日考勤情况
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/dashboard.ts")]
pub struct SubjectAttendanceToday {
    pub subject_id: i64,
    pub subject_name: String,
    pub enrolled_students: u64,
    pub attendance_marked: u64,
    pub present_count: u64,
    pub attendance_pending: u64,
}

impl SubjectAttendanceToday {
    pub fn new(subject: &Subject, enrolled: u64, marked: u64, present: u64) -> Self {
        Self {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            enrolled_students: enrolled,
            attendance_marked: marked,
            present_count: present,
            attendance_pending: enrolled.saturating_sub(marked),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/dashboard.ts")]
pub struct SubjectGradingOverview {
    pub subject_id: i64,
    pub subject_name: String,
    pub total_students: u64,
    pub total_grades: u64,
    pub published_grades: u64,
    pub pending_grades: u64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/dashboard.ts")]
pub struct TeacherDashboard {
    pub profile: TeacherDetail,
    pub subjects: Vec<Subject>,
    pub subject_count: u64,
    pub total_students: u64,
    pub today: chrono::NaiveDate,
    pub attendance_today: Vec<SubjectAttendanceToday>,
    pub grading_overview: Vec<SubjectGradingOverview>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/dashboard.ts")]
pub struct StudentDashboard {
    pub profile: StudentDetail,
    pub enrollment: EnrollmentOverview,
    pub attendance: AttendanceSummary,
    pub gpa: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_pending_never_negative() {
        let subject = Subject {
            id: 1,
            name: "Biology".to_string(),
            code: "BIO1".to_string(),
            description: None,
            class_id: 1,
            teacher_id: Some(1),
            credits: 3,
            is_mandatory: true,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(SubjectAttendanceToday::new(&subject, 20, 15, 14).attendance_pending, 5);
        // 已退选学生的旧记录可能使记录数超过当前选课数
        assert_eq!(SubjectAttendanceToday::new(&subject, 2, 3, 3).attendance_pending, 0);
    }
}

//! 选课规则

use crate::models::ErrorCode;
use crate::models::subjects::Subject;
use crate::utils::round_to;

use super::entities::Enrollment;

/// 选课被拒绝的原因，按检查顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentRejection {
    NotInClass,
    AlreadyEnrolled,
    LimitReached { max: u64 },
    SubjectInactive,
}

impl EnrollmentRejection {
    pub fn message(&self) -> String {
        match self {
            EnrollmentRejection::NotInClass => "Subject is not available for your class".to_string(),
            EnrollmentRejection::AlreadyEnrolled => "Already enrolled in this subject".to_string(),
            EnrollmentRejection::LimitReached { max } => {
                format!("Maximum subject limit reached ({max} subjects)")
            }
            EnrollmentRejection::SubjectInactive => "Subject is not currently active".to_string(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            EnrollmentRejection::NotInClass => ErrorCode::SubjectNotInClass,
            EnrollmentRejection::AlreadyEnrolled => ErrorCode::AlreadyEnrolled,
            EnrollmentRejection::LimitReached { .. } => ErrorCode::EnrollmentLimitReached,
            EnrollmentRejection::SubjectInactive => ErrorCode::SubjectInactive,
        }
    }
}

/// 检查学生能否选修某科目，第一个不满足的条件即为结果
///
/// - `student_class_id`: 学生所在班级
/// - `has_active_enrollment`: 该科目是否已有有效选课
/// - `active_count`: 学生当前有效选课数
pub fn check_enrollment(
    student_class_id: Option<i64>,
    subject: &Subject,
    has_active_enrollment: bool,
    active_count: u64,
    max_active: u64,
) -> Result<(), EnrollmentRejection> {
    if student_class_id != Some(subject.class_id) {
        return Err(EnrollmentRejection::NotInClass);
    }
    if has_active_enrollment {
        return Err(EnrollmentRejection::AlreadyEnrolled);
    }
    if active_count >= max_active {
        return Err(EnrollmentRejection::LimitReached { max: max_active });
    }
    if !subject.is_active {
        return Err(EnrollmentRejection::SubjectInactive);
    }
    Ok(())
}

/// 选课结果
#[derive(Debug, Clone)]
pub enum EnrollmentOutcome {
    Enrolled(Enrollment),
    Reenrolled(Enrollment),
    Rejected(EnrollmentRejection),
}

impl EnrollmentOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, EnrollmentOutcome::Rejected(_))
    }

    pub fn message(&self) -> String {
        match self {
            EnrollmentOutcome::Enrolled(_) => "Successfully enrolled in subject".to_string(),
            EnrollmentOutcome::Reenrolled(_) => "Successfully re-enrolled in subject".to_string(),
            EnrollmentOutcome::Rejected(reason) => reason.message(),
        }
    }
}

/// 退选结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnenrollmentOutcome {
    Unenrolled { subject_name: String },
    NotEnrolled,
    Mandatory,
}

impl UnenrollmentOutcome {
    pub fn message(&self) -> String {
        match self {
            UnenrollmentOutcome::Unenrolled { subject_name } => {
                format!("Successfully unenrolled from {subject_name}")
            }
            UnenrollmentOutcome::NotEnrolled => "You are not enrolled in this subject".to_string(),
            UnenrollmentOutcome::Mandatory => "Cannot unenroll from mandatory subjects".to_string(),
        }
    }
}

/// 选课比例（保留一位小数）
pub fn enrollment_percentage(total_enrolled: u64, max_subjects: u64) -> f64 {
    if max_subjects == 0 {
        return 0.0;
    }
    round_to(total_enrolled as f64 / max_subjects as f64 * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(class_id: i64, is_active: bool) -> Subject {
        Subject {
            id: 10,
            name: "Physics".to_string(),
            code: "PHY101".to_string(),
            description: None,
            class_id,
            teacher_id: None,
            credits: 3,
            is_mandatory: false,
            is_active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_enrollment_allowed() {
        assert_eq!(check_enrollment(Some(1), &subject(1, true), false, 7, 8), Ok(()));
    }

    #[test]
    fn test_student_without_class() {
        assert_eq!(
            check_enrollment(None, &subject(1, true), false, 0, 8),
            Err(EnrollmentRejection::NotInClass)
        );
    }

    #[test]
    fn test_class_mismatch_checked_first() {
        // 其余条件同时不满足时仍报告班级不匹配
        assert_eq!(
            check_enrollment(Some(2), &subject(1, false), true, 8, 8),
            Err(EnrollmentRejection::NotInClass)
        );
    }

    #[test]
    fn test_duplicate_before_limit() {
        assert_eq!(
            check_enrollment(Some(1), &subject(1, false), true, 8, 8),
            Err(EnrollmentRejection::AlreadyEnrolled)
        );
    }

    #[test]
    fn test_limit_before_inactive() {
        let result = check_enrollment(Some(1), &subject(1, false), false, 8, 8);
        assert_eq!(result, Err(EnrollmentRejection::LimitReached { max: 8 }));
        assert_eq!(
            result.unwrap_err().message(),
            "Maximum subject limit reached (8 subjects)"
        );
    }

    #[test]
    fn test_inactive_subject() {
        let result = check_enrollment(Some(1), &subject(1, false), false, 3, 8);
        assert_eq!(result, Err(EnrollmentRejection::SubjectInactive));
        assert_eq!(result.unwrap_err().message(), "Subject is not currently active");
    }

    #[test]
    fn test_unenrollment_messages() {
        let done = UnenrollmentOutcome::Unenrolled {
            subject_name: "Art".to_string(),
        };
        assert_eq!(done.message(), "Successfully unenrolled from Art");
        assert_eq!(
            UnenrollmentOutcome::Mandatory.message(),
            "Cannot unenroll from mandatory subjects"
        );
        assert_eq!(
            UnenrollmentOutcome::NotEnrolled.message(),
            "You are not enrolled in this subject"
        );
    }

    #[test]
    fn test_enrollment_percentage() {
        assert_eq!(enrollment_percentage(3, 8), 37.5);
        assert_eq!(enrollment_percentage(1, 3), 33.3);
        assert_eq!(enrollment_percentage(8, 8), 100.0);
        assert_eq!(enrollment_percentage(0, 0), 0.0);
    }
}

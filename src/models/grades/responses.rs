use serde::Serialize;
use ts_rs::TS;

use super::calculation::{average_percentage, gpa_from_percentages};
use super::entities::{Grade, GradeView};
use crate::models::common::PaginationInfo;
use crate::models::subjects::Subject;
use crate::utils::round_to;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeView>,
    pub pagination: PaginationInfo,
}

/// 单科成绩汇总（仅已发布成绩）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct SubjectGradeSummary {
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    /// 按布置日期倒序
    pub grades: Vec<GradeView>,
    pub average_percentage: f64,
    pub total_assignments: u64,
    pub latest_grade: Option<GradeView>,
}

impl SubjectGradeSummary {
    /// 没有成绩时返回 None
    pub fn build(subject: &Subject, mut grades: Vec<Grade>) -> Option<Self> {
        if grades.is_empty() {
            return None;
        }
        grades.sort_by(|a, b| b.date_assigned.cmp(&a.date_assigned));
        let average = average_percentage(grades.iter().map(|g| g.percentage))
            .map(|avg| round_to(avg, 1))
            .unwrap_or(0.0);
        let views: Vec<GradeView> = grades.into_iter().map(GradeView::from).collect();
        Some(Self {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            subject_code: subject.code.clone(),
            average_percentage: average,
            total_assignments: views.len() as u64,
            latest_grade: views.first().cloned(),
            grades: views,
        })
    }
}

/// 学生本人的成绩概览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct StudentGradesOverview {
    pub subjects: Vec<SubjectGradeSummary>,
    pub gpa: f64,
}

impl StudentGradesOverview {
    pub fn new(subjects: Vec<SubjectGradeSummary>) -> Self {
        let gpa = gpa_from_percentages(
            subjects
                .iter()
                .flat_map(|s| s.grades.iter().map(|g| g.grade.percentage)),
        );
        Self { subjects, gpa }
    }
}

/// 科目成绩报表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct StudentGradeRow {
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    pub total_grades: u64,
    pub average_percentage: Option<f64>,
    pub letter_grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct GradeReport {
    pub subject_id: i64,
    pub rows: Vec<StudentGradeRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::GradeType;
    use chrono::NaiveDate;

    fn subject() -> Subject {
        Subject {
            id: 3,
            name: "Chemistry".to_string(),
            code: "CHE201".to_string(),
            description: None,
            class_id: 1,
            teacher_id: None,
            credits: 3,
            is_mandatory: true,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn grade(id: i64, day: u32, percentage: f64) -> Grade {
        Grade {
            id,
            student_id: 1,
            subject_id: 3,
            grade_type: GradeType::Quiz,
            title: format!("Quiz {id}"),
            marks_obtained: percentage,
            total_marks: 100.0,
            percentage: Some(percentage),
            letter_grade: None,
            date_assigned: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            date_submitted: None,
            comments: None,
            graded_by: None,
            is_published: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_subject_summary_orders_newest_first() {
        let summary =
            SubjectGradeSummary::build(&subject(), vec![grade(1, 1, 80.0), grade(2, 9, 95.0)])
                .unwrap();
        assert_eq!(summary.total_assignments, 2);
        assert_eq!(summary.average_percentage, 87.5);
        assert_eq!(summary.latest_grade.as_ref().map(|g| g.grade.id), Some(2));
        assert_eq!(summary.grades[0].performance, "excellent");
    }

    #[test]
    fn test_subject_summary_empty() {
        assert!(SubjectGradeSummary::build(&subject(), vec![]).is_none());
    }

    #[test]
    fn test_overview_gpa_over_all_grades() {
        let a = SubjectGradeSummary::build(&subject(), vec![grade(1, 1, 90.0)]).unwrap();
        let b = SubjectGradeSummary::build(
            &subject(),
            vec![grade(2, 2, 70.0), grade(3, 3, 80.0)],
        )
        .unwrap();
        // (90 + 70 + 80) / 3 = 80 -> 3.2
        assert_eq!(StudentGradesOverview::new(vec![a, b]).gpa, 3.2);
        assert_eq!(StudentGradesOverview::new(vec![]).gpa, 0.0);
    }
}

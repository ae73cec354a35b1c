use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::calculation;
use crate::define_string_enum;

define_string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "school/grade.ts")]
    pub enum GradeType ("grade type") {
        Assignment => "assignment",
        Quiz => "quiz",
        Midterm => "midterm",
        Final => "final",
        Project => "project",
        Participation => "participation",
        Homework => "homework",
        Test => "test",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade_type: GradeType,
    pub title: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: Option<f64>,
    pub letter_grade: Option<String>,
    pub date_assigned: chrono::NaiveDate,
    pub date_submitted: Option<chrono::NaiveDate>,
    pub comments: Option<String>,
    // 评分教师档案 ID
    pub graded_by: Option<i64>,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Grade {
    pub fn is_passing(&self) -> bool {
        calculation::is_passing(self.percentage)
    }

    pub fn performance_band(&self) -> &'static str {
        calculation::performance_band(self.percentage)
    }
}

/// 百分比与字母等级
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedScore {
    pub percentage: Option<f64>,
    pub letter_grade: Option<String>,
}

impl DerivedScore {
    pub fn from_marks(marks_obtained: f64, total_marks: f64) -> Self {
        let percentage = calculation::compute_percentage(marks_obtained, total_marks);
        Self {
            percentage,
            letter_grade: percentage.map(|p| calculation::letter_grade(p).to_string()),
        }
    }
}

/// 带展示字段的成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct GradeView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub is_passing: bool,
    pub performance: String,
}

impl From<Grade> for GradeView {
    fn from(grade: Grade) -> Self {
        Self {
            is_passing: grade.is_passing(),
            performance: grade.performance_band().to_string(),
            grade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_score() {
        let score = DerivedScore::from_marks(87.0, 100.0);
        assert_eq!(score.percentage, Some(87.0));
        assert_eq!(score.letter_grade.as_deref(), Some("B+"));

        let none = DerivedScore::from_marks(5.0, 0.0);
        assert_eq!(none.percentage, None);
        assert_eq!(none.letter_grade, None);
    }

    #[test]
    fn test_grade_type_parse() {
        assert_eq!("midterm".parse::<GradeType>().unwrap(), GradeType::Midterm);
        assert!("exam".parse::<GradeType>().is_err());
    }
}

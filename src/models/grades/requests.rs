use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradeType;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade_type: GradeType,
    pub title: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub date_assigned: chrono::NaiveDate,
    pub date_submitted: Option<chrono::NaiveDate>,
    pub comments: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct UpdateGradeRequest {
    pub grade_type: Option<GradeType>,
    pub title: Option<String>,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    pub date_assigned: Option<chrono::NaiveDate>,
    pub date_submitted: Option<chrono::NaiveDate>,
    pub comments: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/grade.ts")]
pub struct GradeQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub grade_type: Option<GradeType>,
    pub is_published: Option<bool>,
}

// 用于存储层
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub grade_type: Option<GradeType>,
    pub is_published: Option<bool>,
}

impl GradeListQuery {
    pub fn for_subject(subject_id: i64, params: GradeQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            subject_id: Some(subject_id),
            student_id: params.student_id,
            grade_type: params.grade_type,
            is_published: params.is_published,
        }
    }
}

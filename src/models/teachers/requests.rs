use super::entities::{Qualification, TeacherDetail};
use crate::models::common::{PaginationInfo, PaginationQuery};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub qualification: Option<Qualification>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct CreateTeacherProfileRequest {
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: Qualification,
    pub specialization: String,
    #[serde(default)]
    pub experience_years: i32,
    pub joining_date: chrono::NaiveDate,
    pub salary: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct UpdateTeacherProfileRequest {
    pub employee_id: Option<String>,
    pub qualification: Option<Qualification>,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub salary: Option<f64>,
    pub is_active: Option<bool>,
}

// 用于存储层
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub qualification: Option<Qualification>,
    pub is_active: Option<bool>,
}

impl From<TeacherListParams> for TeacherListQuery {
    fn from(params: TeacherListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            qualification: params.qualification,
            is_active: params.is_active,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct TeacherListResponse {
    pub items: Vec<TeacherDetail>,
    pub pagination: PaginationInfo,
}

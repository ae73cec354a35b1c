use super::entities::SubjectDetail;
use crate::models::common::{PaginationInfo, PaginationQuery};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct SubjectQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub class_id: i64,
    pub teacher_id: Option<i64>,
    /// 缺省为 3
    pub credits: Option<i32>,
    pub is_mandatory: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    /// 为 true 时取消任课教师（忽略 teacher_id）
    #[serde(default)]
    pub clear_teacher: bool,
    pub credits: Option<i32>,
    pub is_mandatory: Option<bool>,
    pub is_active: Option<bool>,
}

// 用于存储层
#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl From<SubjectQueryParams> for SubjectListQuery {
    fn from(params: SubjectQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            teacher_id: params.teacher_id,
            is_active: params.is_active,
            search: params.search,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<SubjectDetail>,
    pub pagination: PaginationInfo,
}

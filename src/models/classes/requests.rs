use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub academic_year: String,
    /// 缺省为 30
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub academic_year: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub academic_year: Option<String>,
}

impl From<ClassQueryParams> for ClassListQuery {
    fn from(params: ClassQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            is_active: params.is_active,
            academic_year: params.academic_year,
        }
    }
}

use super::entities::StudentDetail;
use crate::models::common::{PaginationInfo, PaginationQuery};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct CreateStudentProfileRequest {
    pub user_id: i64,
    pub student_number: String,
    pub class_id: Option<i64>,
    pub admission_date: chrono::NaiveDate,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub emergency_contact: String,
    pub medical_info: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct UpdateStudentProfileRequest {
    pub student_number: Option<String>,
    pub class_id: Option<i64>,
    /// 为 true 时将学生移出班级（忽略 class_id）
    #[serde(default)]
    pub clear_class: bool,
    pub admission_date: Option<chrono::NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_info: Option<String>,
    pub is_active: Option<bool>,
}

// 用于存储层
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            search: params.search,
            is_active: params.is_active,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentDetail>,
    pub pagination: PaginationInfo,
}

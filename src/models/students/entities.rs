use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    /// 学号
    pub student_number: String,
    pub class_id: Option<i64>,
    pub admission_date: chrono::NaiveDate,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub emergency_contact: String,
    pub medical_info: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 学生档案 + 账号与班级信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/student.ts")]
pub struct StudentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub profile: StudentProfile,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub class_name: Option<String>,
}

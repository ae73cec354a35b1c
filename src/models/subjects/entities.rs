use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_CREDITS: i32 = 3;
pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    // 科目代码，全局唯一
    pub code: String,
    pub description: Option<String>,
    pub class_id: i64,
    // 任课教师（教师档案 ID）
    pub teacher_id: Option<i64>,
    pub credits: i32,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/subject.ts")]
pub struct SubjectDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub class_name: String,
    pub teacher_name: Option<String>,
    pub enrolled_students_count: u64,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_CLASS_CAPACITY: i32 = 30;
pub const MIN_CLASS_CAPACITY: i32 = 1;
pub const MAX_CLASS_CAPACITY: i32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/class.ts")]
pub struct Class {
    pub id: i64,
    // 班级名称，全局唯一
    pub name: String,
    pub description: Option<String>,
    // 学年，如 "2024-2025"
    pub academic_year: String,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 带统计信息的班级
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/class.ts")]
pub struct ClassDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub student_count: u64,
    pub subject_count: u64,
}

impl ClassDetail {
    pub fn is_full(&self) -> bool {
        self.student_count >= self.class.capacity.max(0) as u64
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 教师/管理员对学生的备注
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/note.ts")]
pub struct StudentNote {
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub content: String,
    // 作者用户 ID
    pub created_by: i64,
    /// 私密备注学生本人不可见
    pub is_private: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/note.ts")]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
}

//! 学生备注存储操作

use super::SeaOrmStorage;
use crate::entity::student_notes::{ActiveModel, Column, Entity as StudentNotes};
use crate::errors::{Result, SchoolError};
use crate::models::notes::{CreateNoteRequest, StudentNote};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_note_impl(
        &self,
        student_id: i64,
        created_by: i64,
        req: CreateNoteRequest,
    ) -> Result<StudentNote> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            created_by: Set(created_by),
            is_private: Set(req.is_private),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建备注失败: {e}")))?;

        Ok(result.into_note())
    }

    pub async fn get_note_by_id_impl(&self, note_id: i64) -> Result<Option<StudentNote>> {
        let result = StudentNotes::find_by_id(note_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注失败: {e}")))?;

        Ok(result.map(|m| m.into_note()))
    }

    /// 学生的备注，最新在前；`include_private` 为 false 时只返回公开备注
    pub async fn list_student_notes_impl(
        &self,
        student_id: i64,
        include_private: bool,
    ) -> Result<Vec<StudentNote>> {
        let mut select = StudentNotes::find().filter(Column::StudentId.eq(student_id));
        if !include_private {
            select = select.filter(Column::IsPrivate.eq(false));
        }

        let notes = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注列表失败: {e}")))?;

        Ok(notes.into_iter().map(|m| m.into_note()).collect())
    }

    pub async fn delete_note_impl(&self, note_id: i64) -> Result<bool> {
        let result = StudentNotes::delete_by_id(note_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除备注失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

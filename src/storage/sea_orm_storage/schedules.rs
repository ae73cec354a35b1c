//! 教师课表存储操作

use chrono::NaiveTime;

use super::SeaOrmStorage;
use crate::entity::teacher_schedules::{ActiveModel, Column, Entity as TeacherSchedules};
use crate::errors::{Result, SchoolError};
use crate::models::schedules::{
    CreateScheduleRequest, TeacherSchedule, UpdateScheduleRequest, Weekday,
};
use crate::utils::dates::format_time;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, Unchanged,
};

impl SeaOrmStorage {
    pub async fn create_schedule_impl(
        &self,
        teacher_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<TeacherSchedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            weekday: Set(req.weekday.to_string()),
            start_time: Set(format_time(req.start_time)),
            end_time: Set(format_time(req.end_time)),
            subject_id: Set(req.subject_id),
            room_number: Set(req.room_number),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建课表失败: {e}")))?;

        Ok(result.into_schedule())
    }

    pub async fn get_schedule_by_id_impl(&self, schedule_id: i64) -> Result<Option<TeacherSchedule>> {
        let result = TeacherSchedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// (教师, 星期, 开始时间) 唯一
    pub async fn find_schedule_slot_impl(
        &self,
        teacher_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
    ) -> Result<Option<TeacherSchedule>> {
        let result = TeacherSchedules::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Weekday.eq(weekday.to_string()))
            .filter(Column::StartTime.eq(format_time(start_time)))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 按 (星期, 开始时间) 排序；星期按周一到周日而非字母序
    pub async fn list_schedules_impl(
        &self,
        teacher_id: Option<i64>,
        weekday: Option<Weekday>,
    ) -> Result<Vec<TeacherSchedule>> {
        let mut select = TeacherSchedules::find();
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(weekday) = weekday {
            select = select.filter(Column::Weekday.eq(weekday.to_string()));
        }

        let mut schedules: Vec<TeacherSchedule> = select
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_schedule())
            .collect();

        schedules.sort_by(|a, b| {
            (a.weekday, a.start_time, a.teacher_id).cmp(&(b.weekday, b.start_time, b.teacher_id))
        });
        Ok(schedules)
    }

    pub async fn update_schedule_impl(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>> {
        if self.get_schedule_by_id_impl(schedule_id).await?.is_none() {
            return Ok(None);
        }

        // 主键不计入变更判断
        let mut model = ActiveModel {
            id: Unchanged(schedule_id),
            ..Default::default()
        };

        if let Some(weekday) = update.weekday {
            model.weekday = Set(weekday.to_string());
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(format_time(start_time));
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(format_time(end_time));
        }
        if update.clear_subject {
            model.subject_id = Set(None);
        } else if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(Some(subject_id));
        }
        if let Some(room_number) = update.room_number {
            model.room_number = Set(Some(room_number).filter(|r| !r.is_empty()));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        if !model.is_changed() {
            return self.get_schedule_by_id_impl(schedule_id).await;
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新课表失败: {e}")))?;

        self.get_schedule_by_id_impl(schedule_id).await
    }

    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = TeacherSchedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

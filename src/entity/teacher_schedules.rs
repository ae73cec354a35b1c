//! 教师课表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub weekday: String,
    // HH:MM
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Option<i64>,
    pub room_number: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher_profiles::Entity",
        from = "Column::TeacherId",
        to = "super::teacher_profiles::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::teacher_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::TeacherSchedule {
        use crate::models::schedules::{TeacherSchedule, Weekday};
        use crate::utils::dates::{parse_time, timestamp_to_datetime};

        TeacherSchedule {
            id: self.id,
            teacher_id: self.teacher_id,
            weekday: self.weekday.parse::<Weekday>().unwrap_or(Weekday::Monday),
            start_time: parse_time(&self.start_time).unwrap_or_default(),
            end_time: parse_time(&self.end_time).unwrap_or_default(),
            subject_id: self.subject_id,
            room_number: self.room_number,
            is_active: self.is_active,
            created_at: timestamp_to_datetime(self.created_at),
        }
    }
}

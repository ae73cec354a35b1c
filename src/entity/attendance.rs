//! 考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    // YYYY-MM-DD，字典序即日期序
    pub date: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub marked_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teacher_profiles::Entity",
        from = "Column::MarkedBy",
        to = "super::teacher_profiles::Column::Id"
    )]
    MarkedBy,
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendance::entities::Attendance {
        use crate::models::attendance::entities::{Attendance, AttendanceStatus};
        use crate::utils::dates::{parse_date, timestamp_to_datetime};

        Attendance {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            date: parse_date(&self.date).unwrap_or_default(),
            status: self.status.parse::<AttendanceStatus>().unwrap_or_default(),
            remarks: self.remarks,
            marked_by: self.marked_by,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

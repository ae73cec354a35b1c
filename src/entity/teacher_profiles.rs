//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub qualification: String,
    pub specialization: String,
    pub experience_years: i32,
    pub joining_date: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub salary: Option<f64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::subjects::Entity")]
    Subjects,
    #[sea_orm(has_many = "super::teacher_schedules::Entity")]
    Schedules,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl Related<super::teacher_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_profile(self) -> crate::models::teachers::entities::TeacherProfile {
        use crate::models::teachers::entities::{Qualification, TeacherProfile};
        use crate::utils::dates::{parse_date, timestamp_to_datetime};

        TeacherProfile {
            id: self.id,
            user_id: self.user_id,
            employee_id: self.employee_id,
            qualification: self
                .qualification
                .parse::<Qualification>()
                .unwrap_or(Qualification::Other),
            specialization: self.specialization,
            experience_years: self.experience_years,
            joining_date: parse_date(&self.joining_date).unwrap_or_default(),
            salary: self.salary,
            is_active: self.is_active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

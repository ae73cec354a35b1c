//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade_type: String,
    pub title: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub percentage: Option<f64>,
    pub letter_grade: Option<String>,
    pub date_assigned: String,
    pub date_submitted: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub graded_by: Option<i64>,
    pub is_published: bool,
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
        from = "Column::GradedBy",
        to = "super::teacher_profiles::Column::Id"
    )]
    Grader,
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
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, GradeType};
        use crate::utils::dates::{parse_date, timestamp_to_datetime};

        Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            grade_type: self
                .grade_type
                .parse::<GradeType>()
                .unwrap_or(GradeType::Assignment),
            title: self.title,
            marks_obtained: self.marks_obtained,
            total_marks: self.total_marks,
            percentage: self.percentage,
            letter_grade: self.letter_grade,
            date_assigned: parse_date(&self.date_assigned).unwrap_or_default(),
            date_submitted: self.date_submitted.as_deref().and_then(parse_date),
            comments: self.comments,
            graded_by: self.graded_by,
            is_published: self.is_published,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

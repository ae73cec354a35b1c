use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{StudentProfiles, Subjects, TeacherProfiles, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 学生备注表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentNotes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentNotes::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentNotes::Title).string_len(200).not_null())
                    .col(ColumnDef::new(StudentNotes::Content).text().not_null())
                    .col(
                        ColumnDef::new(StudentNotes::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentNotes::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentNotes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentNotes::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentNotes::Table, StudentNotes::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentNotes::Table, StudentNotes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 教师课表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TeacherSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherSchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::Weekday)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::StartTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::EndTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::SubjectId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::RoomNumber)
                            .string_len(20)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TeacherSchedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSchedules::Table, TeacherSchedules::TeacherId)
                            .to(TeacherProfiles::Table, TeacherProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSchedules::Table, TeacherSchedules::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_notes_student_id")
                    .table(StudentNotes::Table)
                    .col(StudentNotes::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_teacher_schedules_teacher_weekday_start")
                    .table(TeacherSchedules::Table)
                    .col(TeacherSchedules::TeacherId)
                    .col(TeacherSchedules::Weekday)
                    .col(TeacherSchedules::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentNotes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentNotes {
    #[sea_orm(iden = "student_notes")]
    Table,
    Id,
    StudentId,
    Title,
    Content,
    CreatedBy,
    IsPrivate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherSchedules {
    #[sea_orm(iden = "teacher_schedules")]
    Table,
    Id,
    TeacherId,
    Weekday,
    StartTime,
    EndTime,
    SubjectId,
    RoomNumber,
    IsActive,
    CreatedAt,
}

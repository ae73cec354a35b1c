//! 选课存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::prelude::{StudentProfiles, Subjects};
use crate::entity::subjects;
use crate::errors::{Result, SchoolError};
use crate::models::{
    enrollments::{
        EnrolledSubject, Enrollment, EnrollmentOutcome, UnenrollmentOutcome, check_enrollment,
    },
    students::StudentProfile,
    subjects::Subject,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;

/// 学生当前的有效选课数
async fn count_active<C: ConnectionTrait>(conn: &C, student_id: i64) -> Result<u64> {
    Enrollments::find()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::IsActive.eq(true))
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("统计选课数量失败: {e}")))
}

/// 选课事务内的学生档案行锁
fn lock_student_row(student_id: i64) -> Select<StudentProfiles> {
    StudentProfiles::find_by_id(student_id).lock_exclusive()
}

impl SeaOrmStorage {
    /// 选课：检查与写入在同一事务内完成
    pub async fn enroll_student_impl(
        &self,
        student: &StudentProfile,
        subject: &Subject,
        max_active: u64,
    ) -> Result<EnrollmentOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        // 锁住学生档案行，同一学生的并发选课在此排队；SQLite 写入本身串行
        if txn.get_database_backend() != DbBackend::Sqlite {
            lock_student_row(student.id)
                .one(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("锁定学生档案失败: {e}")))?
                .ok_or_else(|| {
                    SchoolError::not_found(format!("Student profile {} not found", student.id))
                })?;
        }

        // 事务内重新读取科目状态
        let subject = Subjects::find_by_id(subject.id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?
            .map(|m| m.into_subject())
            .ok_or_else(|| SchoolError::not_found(format!("Subject {} not found", subject.id)))?;

        let existing = Enrollments::find()
            .filter(Column::StudentId.eq(student.id))
            .filter(Column::SubjectId.eq(subject.id))
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课记录失败: {e}")))?;

        let has_active = existing.as_ref().is_some_and(|m| m.is_active);
        let active_count = count_active(&txn, student.id).await?;

        if let Err(reason) =
            check_enrollment(student.class_id, &subject, has_active, active_count, max_active)
        {
            debug!(
                "Enrollment of student {} in subject {} rejected: {:?}",
                student.id, subject.id, reason
            );
            return Ok(EnrollmentOutcome::Rejected(reason));
        }

        let now = chrono::Utc::now().timestamp();

        let outcome = match existing {
            // 已退选的记录重新激活
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.is_active = Set(true);
                active.enrollment_date = Set(now);
                active.updated_at = Set(now);
                let updated = active
                    .update(&txn)
                    .await
                    .map_err(|e| SchoolError::database_operation(format!("恢复选课失败: {e}")))?;
                EnrollmentOutcome::Reenrolled(updated.into_enrollment())
            }
            None => {
                let model = ActiveModel {
                    student_id: Set(student.id),
                    subject_id: Set(subject.id),
                    enrollment_date: Set(now),
                    is_active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let inserted = model
                    .insert(&txn)
                    .await
                    .map_err(|e| SchoolError::database_operation(format!("创建选课失败: {e}")))?;
                EnrollmentOutcome::Enrolled(inserted.into_enrollment())
            }
        };

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(outcome)
    }

    /// 退选：必修科目不可退，退选即删除记录
    pub async fn unenroll_student_impl(
        &self,
        student_id: i64,
        subject: &Subject,
    ) -> Result<UnenrollmentOutcome> {
        let existing = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject.id))
            .filter(Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课记录失败: {e}")))?;

        let Some(enrollment) = existing else {
            return Ok(UnenrollmentOutcome::NotEnrolled);
        };

        if subject.is_mandatory {
            return Ok(UnenrollmentOutcome::Mandatory);
        }

        Enrollments::delete_by_id(enrollment.id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除选课失败: {e}")))?;

        Ok(UnenrollmentOutcome::Unenrolled {
            subject_name: subject.name.clone(),
        })
    }

    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 学生的有效选课，按选课时间倒序
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrolledSubject>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsActive.eq(true))
            .find_also_related(Subjects)
            .order_by_desc(Column::EnrollmentDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, subject)| {
                subject.map(|s| EnrolledSubject::new(enrollment.into_enrollment(), s.into_subject()))
            })
            .collect())
    }

    async fn active_subject_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        Enrollments::find()
            .select_only()
            .column(Column::SubjectId)
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsActive.eq(true))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课科目失败: {e}")))
    }

    /// 本班有效科目中尚未选修的，学生没有班级时为空
    pub async fn list_available_subjects_impl(
        &self,
        student: &StudentProfile,
    ) -> Result<Vec<Subject>> {
        let Some(class_id) = student.class_id else {
            return Ok(Vec::new());
        };

        let enrolled = self.active_subject_ids(student.id).await?;

        let mut select = Subjects::find()
            .filter(subjects::Column::ClassId.eq(class_id))
            .filter(subjects::Column::IsActive.eq(true));
        if !enrolled.is_empty() {
            select = select.filter(subjects::Column::Id.is_not_in(enrolled));
        }

        let subjects = select
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询可选科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn count_active_enrollments_impl(&self, student_id: i64) -> Result<u64> {
        count_active(&self.db, student_id).await
    }

    pub async fn count_all_active_enrollments_impl(&self) -> Result<u64> {
        Enrollments::find()
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计选课数量失败: {e}")))
    }

    /// 返回未在该科目有效选课的学生 ID，保持输入顺序并去重
    pub async fn find_unenrolled_students_impl(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let enrolled: HashSet<i64> = Enrollments::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::StudentId.is_in(student_ids.to_vec()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课学生失败: {e}")))?
            .into_iter()
            .collect();

        let mut seen = HashSet::new();
        Ok(student_ids
            .iter()
            .copied()
            .filter(|id| !enrolled.contains(id) && seen.insert(*id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::QueryTrait;

    #[test]
    fn test_student_row_lock_is_for_update() {
        for backend in [DbBackend::Postgres, DbBackend::MySql] {
            let sql = lock_student_row(7).build(backend).to_string();
            assert!(sql.ends_with("FOR UPDATE"), "{sql}");
        }
    }
}

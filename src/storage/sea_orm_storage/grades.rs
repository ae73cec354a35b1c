//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    grades::{
        calculation::{average_percentage, letter_grade},
        entities::{DerivedScore, Grade, GradeType, GradeView},
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::{GradeListResponse, GradeReport, StudentGradeRow},
    },
};
use crate::utils::dates::format_date;
use crate::utils::round_to;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

/// 违反 (学生, 科目, 标题, 类型) 唯一索引时返回 Conflict
fn grade_write_error(context: &str, err: DbErr) -> SchoolError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SchoolError::conflict(format!("{context}: duplicate grade ({detail})"))
        }
        _ => SchoolError::database_operation(format!("{context}: {err}")),
    }
}

impl SeaOrmStorage {
    /// 创建成绩，百分比与字母等级由分数推导
    pub async fn create_grade_impl(
        &self,
        req: CreateGradeRequest,
        graded_by: Option<i64>,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();
        let derived = DerivedScore::from_marks(req.marks_obtained, req.total_marks);

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            grade_type: Set(req.grade_type.to_string()),
            title: Set(req.title.trim().to_string()),
            marks_obtained: Set(req.marks_obtained),
            total_marks: Set(req.total_marks),
            percentage: Set(derived.percentage),
            letter_grade: Set(derived.letter_grade),
            date_assigned: Set(format_date(req.date_assigned)),
            date_submitted: Set(req.date_submitted.map(format_date)),
            comments: Set(req.comments),
            graded_by: Set(graded_by),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| grade_write_error("创建成绩失败", e))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn find_grade_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        title: &str,
        grade_type: GradeType,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Title.eq(title.trim()))
            .filter(Column::GradeType.eq(grade_type.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页查询成绩，按布置日期倒序
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Grades::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref grade_type) = query.grade_type {
            select = select.filter(Column::GradeType.eq(grade_type.to_string()));
        }
        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        select = select
            .order_by_desc(Column::DateAssigned)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades
                .into_iter()
                .map(|m| GradeView::from(m.into_grade()))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 学生已发布的成绩，可按科目过滤
    pub async fn list_student_published_grades_impl(
        &self,
        student_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Grade>> {
        let mut select = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsPublished.eq(true));
        if let Some(subject_id) = subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let grades = select
            .order_by_desc(Column::DateAssigned)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 科目成绩报表：每名有效选课学生的平均百分比
    pub async fn subject_grade_report_impl(&self, subject_id: i64) -> Result<GradeReport> {
        let students = self.list_subject_students_impl(subject_id).await?;

        let grades = Grades::find()
            .filter(Column::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目成绩失败: {e}")))?;

        let mut by_student: HashMap<i64, Vec<Option<f64>>> = HashMap::new();
        for grade in grades {
            by_student
                .entry(grade.student_id)
                .or_default()
                .push(grade.percentage);
        }

        let rows = students
            .into_iter()
            .map(|student| {
                let percentages = by_student.remove(&student.profile.id).unwrap_or_default();
                let total_grades = percentages.len() as u64;
                let average = average_percentage(percentages).map(|avg| round_to(avg, 2));
                StudentGradeRow {
                    student_id: student.profile.id,
                    student_number: student.profile.student_number,
                    student_name: student.full_name,
                    total_grades,
                    average_percentage: average,
                    letter_grade: average.map(|avg| letter_grade(avg).to_string()),
                }
            })
            .collect();

        Ok(GradeReport { subject_id, rows })
    }

    /// (成绩总数, 已发布数)
    pub async fn count_subject_grades_impl(&self, subject_id: i64) -> Result<(u64, u64)> {
        let total = Grades::find()
            .filter(Column::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计成绩数量失败: {e}")))?;

        let published = Grades::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::IsPublished.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计成绩数量失败: {e}")))?;

        Ok((total, published))
    }

    /// 更新成绩，分数变化时重新推导百分比与字母等级
    pub async fn update_grade_impl(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        graded_by: Option<i64>,
    ) -> Result<Option<Grade>> {
        let Some(existing) = self.get_grade_by_id_impl(grade_id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(grade_id),
            updated_at: Set(now),
            ..Default::default()
        };

        let marks_obtained = update.marks_obtained.unwrap_or(existing.marks_obtained);
        let total_marks = update.total_marks.unwrap_or(existing.total_marks);
        let derived = DerivedScore::from_marks(marks_obtained, total_marks);
        model.marks_obtained = Set(marks_obtained);
        model.total_marks = Set(total_marks);
        model.percentage = Set(derived.percentage);
        model.letter_grade = Set(derived.letter_grade);

        if let Some(grade_type) = update.grade_type {
            model.grade_type = Set(grade_type.to_string());
        }
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(date_assigned) = update.date_assigned {
            model.date_assigned = Set(format_date(date_assigned));
        }
        if let Some(date_submitted) = update.date_submitted {
            model.date_submitted = Set(Some(format_date(date_submitted)));
        }
        if let Some(comments) = update.comments {
            model.comments = Set(Some(comments).filter(|c| !c.is_empty()));
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }
        if graded_by.is_some() {
            model.graded_by = Set(graded_by);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| grade_write_error("更新成绩失败", e))?;

        self.get_grade_by_id_impl(grade_id).await
    }

    pub async fn delete_grade_impl(&self, grade_id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(grade_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

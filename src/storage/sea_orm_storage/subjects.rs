//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Classes, Enrollments};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::enrollments;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    subjects::{
        entities::{DEFAULT_CREDITS, Subject, SubjectDetail},
        requests::{
            CreateSubjectRequest, SubjectListQuery, SubjectListResponse, UpdateSubjectRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            code: Set(req.code.trim().to_string()),
            description: Set(req.description),
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            credits: Set(req.credits.unwrap_or(DEFAULT_CREDITS)),
            is_mandatory: Set(req.is_mandatory.unwrap_or(true)),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_code_impl(&self, code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Code.eq(code.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_name_and_class_impl(
        &self,
        name: &str,
        class_id: i64,
    ) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Name.eq(name.trim()))
            .filter(Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 有效选课人数
    pub async fn count_subject_enrollments_impl(&self, subject_id: i64) -> Result<u64> {
        Enrollments::find()
            .filter(enrollments::Column::SubjectId.eq(subject_id))
            .filter(enrollments::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计选课人数失败: {e}")))
    }

    async fn build_subject_detail(&self, subject: Subject) -> Result<SubjectDetail> {
        let class_name = Classes::find_by_id(subject.class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?
            .map(|c| c.name)
            .unwrap_or_default();

        let teacher_name = match subject.teacher_id {
            Some(teacher_id) => self
                .get_teacher_detail_impl(teacher_id)
                .await?
                .map(|t| t.full_name),
            None => None,
        };

        let enrolled_students_count = self.count_subject_enrollments_impl(subject.id).await?;

        Ok(SubjectDetail {
            subject,
            class_name,
            teacher_name,
            enrolled_students_count,
        })
    }

    pub async fn get_subject_detail_impl(&self, subject_id: i64) -> Result<Option<SubjectDetail>> {
        match self.get_subject_by_id_impl(subject_id).await? {
            Some(subject) => Ok(Some(self.build_subject_detail(subject).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出科目，按 (班级, 名称) 排序
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Subjects::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        select = select
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目页数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        let mut items = Vec::with_capacity(subjects.len());
        for model in subjects {
            items.push(self.build_subject_detail(model.into_subject()).await?);
        }

        Ok(SubjectListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        active_only: bool,
    ) -> Result<Vec<Subject>> {
        let mut select = Subjects::find().filter(Column::TeacherId.eq(teacher_id));
        if active_only {
            select = select.filter(Column::IsActive.eq(true));
        }

        let subjects = select
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(subject_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(subject_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(code) = update.code {
            model.code = Set(code.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if update.clear_teacher {
            model.teacher_id = Set(None);
        } else if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(is_mandatory) = update.is_mandatory {
            model.is_mandatory = Set(is_mandatory);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新科目失败: {e}")))?;

        self.get_subject_by_id_impl(subject_id).await
    }

    /// 删除科目，选课、考勤、成绩级联删除
    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_subjects_impl(&self) -> Result<u64> {
        Subjects::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计科目数量失败: {e}")))
    }
}

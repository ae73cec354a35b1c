//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::prelude::{StudentProfiles, Subjects};
use crate::entity::{student_profiles, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::{Class, ClassDetail, DEFAULT_CLASS_CAPACITY},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            academic_year: Set(req.academic_year.trim().to_string()),
            capacity: Set(req.capacity.unwrap_or(DEFAULT_CLASS_CAPACITY)),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn get_class_by_name_impl(&self, name: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn count_class_students_impl(&self, class_id: i64) -> Result<u64> {
        StudentProfiles::find()
            .filter(student_profiles::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级学生失败: {e}")))
    }

    async fn count_class_subjects(&self, class_id: i64) -> Result<u64> {
        Subjects::find()
            .filter(subjects::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级科目失败: {e}")))
    }

    async fn build_class_detail(&self, class: Class) -> Result<ClassDetail> {
        let student_count = self.count_class_students_impl(class.id).await?;
        let subject_count = self.count_class_subjects(class.id).await?;
        Ok(ClassDetail {
            class,
            student_count,
            subject_count,
        })
    }

    /// 班级及统计信息
    pub async fn get_class_detail_impl(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        match self.get_class_by_id_impl(class_id).await? {
            Some(class) => Ok(Some(self.build_class_detail(class).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出班级，按名称排序
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classes::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        if let Some(ref academic_year) = query.academic_year
            && !academic_year.trim().is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(academic_year.trim()));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级列表失败: {e}")))?;

        let mut items = Vec::with_capacity(classes.len());
        for model in classes {
            items.push(self.build_class_detail(model.into_class()).await?);
        }

        Ok(ClassListResponse {
            pagination: PaginationInfo::new(page, size, total, pages),
            items,
        })
    }

    /// 更新班级
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year.trim().to_string());
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，科目级联删除，学生档案的班级置空
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级数量失败: {e}")))
    }
}

//! 教师档案存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::Users;
use crate::entity::teacher_profiles::{ActiveModel, Column, Entity as TeacherProfiles};
use crate::entity::users;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    teachers::{
        entities::{TeacherDetail, TeacherProfile},
        requests::{
            CreateTeacherProfileRequest, TeacherListQuery, TeacherListResponse,
            UpdateTeacherProfileRequest,
        },
    },
};
use crate::utils::dates::format_date;
use crate::utils::{escape_like_pattern, round_to};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建教师档案，工资保留两位小数
    pub async fn create_teacher_profile_impl(
        &self,
        req: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            employee_id: Set(req.employee_id.trim().to_string()),
            qualification: Set(req.qualification.to_string()),
            specialization: Set(req.specialization.trim().to_string()),
            experience_years: Set(req.experience_years),
            joining_date: Set(format_date(req.joining_date)),
            salary: Set(req.salary.map(|s| round_to(s, 2))),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建教师档案失败: {e}")))?;

        Ok(result.into_teacher_profile())
    }

    pub async fn get_teacher_profile_by_id_impl(&self, id: i64) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_profile()))
    }

    pub async fn get_teacher_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_profile()))
    }

    pub async fn get_teacher_profile_by_employee_id_impl(
        &self,
        employee_id: &str,
    ) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find()
            .filter(Column::EmployeeId.eq(employee_id.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_profile()))
    }

    async fn build_teacher_detail(&self, profile: TeacherProfile) -> Result<TeacherDetail> {
        let user = Users::find_by_id(profile.user_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?
            .map(|m| m.into_user());

        let (username, full_name, email) = match user {
            Some(user) => (user.username.clone(), user.full_name(), user.email),
            None => Default::default(),
        };

        Ok(TeacherDetail {
            profile,
            username,
            full_name,
            email,
        })
    }

    pub async fn get_teacher_detail_impl(&self, id: i64) -> Result<Option<TeacherDetail>> {
        match self.get_teacher_profile_by_id_impl(id).await? {
            Some(profile) => Ok(Some(self.build_teacher_detail(profile).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出教师档案，按工号排序
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = TeacherProfiles::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.inner_join(Users).filter(
                Condition::any()
                    .add(Column::EmployeeId.contains(&escaped))
                    .add(Column::Specialization.contains(&escaped))
                    .add(users::Column::FirstName.contains(&escaped))
                    .add(users::Column::LastName.contains(&escaped)),
            );
        }

        if let Some(ref qualification) = query.qualification {
            select = select.filter(Column::Qualification.eq(qualification.to_string()));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        select = select.order_by_asc(Column::EmployeeId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师页数失败: {e}")))?;

        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        let mut items = Vec::with_capacity(profiles.len());
        for model in profiles {
            items.push(self.build_teacher_detail(model.into_teacher_profile()).await?);
        }

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_teacher_profile_impl(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>> {
        if self.get_teacher_profile_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(employee_id) = update.employee_id {
            model.employee_id = Set(employee_id.trim().to_string());
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(qualification.to_string());
        }
        if let Some(specialization) = update.specialization {
            model.specialization = Set(specialization.trim().to_string());
        }
        if let Some(experience_years) = update.experience_years {
            model.experience_years = Set(experience_years);
        }
        if let Some(joining_date) = update.joining_date {
            model.joining_date = Set(format_date(joining_date));
        }
        if let Some(salary) = update.salary {
            model.salary = Set(Some(round_to(salary, 2)));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新教师档案失败: {e}")))?;

        self.get_teacher_profile_by_id_impl(id).await
    }

    /// 删除教师档案，任教科目的教师置空
    pub async fn delete_teacher_profile_impl(&self, id: i64) -> Result<bool> {
        let result = TeacherProfiles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师档案失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

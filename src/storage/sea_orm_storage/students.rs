//! 学生档案存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Classes, Enrollments, Users};
use crate::entity::student_profiles::{ActiveModel, Column, Entity as StudentProfiles};
use crate::entity::{enrollments, users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{StudentDetail, StudentProfile},
        requests::{
            CreateStudentProfileRequest, StudentListQuery, StudentListResponse,
            UpdateStudentProfileRequest,
        },
    },
};
use crate::utils::dates::format_date;
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_profile_impl(
        &self,
        req: CreateStudentProfileRequest,
    ) -> Result<StudentProfile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            student_number: Set(req.student_number.trim().to_string()),
            class_id: Set(req.class_id),
            admission_date: Set(format_date(req.admission_date)),
            guardian_name: Set(req.guardian_name.trim().to_string()),
            guardian_phone: Set(req.guardian_phone),
            guardian_email: Set(req.guardian_email),
            emergency_contact: Set(req.emergency_contact),
            medical_info: Set(req.medical_info),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建学生档案失败: {e}")))?;

        Ok(result.into_student_profile())
    }

    pub async fn get_student_profile_by_id_impl(&self, id: i64) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    pub async fn get_student_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    pub async fn get_student_profile_by_number_impl(
        &self,
        student_number: &str,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(Column::StudentNumber.eq(student_number.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    pub(super) async fn build_student_detail(
        &self,
        profile: StudentProfile,
    ) -> Result<StudentDetail> {
        let user = Users::find_by_id(profile.user_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?
            .map(|m| m.into_user());

        let class_name = match profile.class_id {
            Some(class_id) => Classes::find_by_id(class_id)
                .one(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?
                .map(|c| c.name),
            None => None,
        };

        let (username, full_name, email) = match user {
            Some(user) => (user.username.clone(), user.full_name(), user.email),
            None => Default::default(),
        };

        Ok(StudentDetail {
            profile,
            username,
            full_name,
            email,
            class_name,
        })
    }

    pub async fn get_student_detail_impl(&self, id: i64) -> Result<Option<StudentDetail>> {
        match self.get_student_profile_by_id_impl(id).await? {
            Some(profile) => Ok(Some(self.build_student_detail(profile).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出学生档案，按学号排序
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = StudentProfiles::find();

        // 搜索学号或姓名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.inner_join(Users).filter(
                Condition::any()
                    .add(Column::StudentNumber.contains(&escaped))
                    .add(users::Column::Username.contains(&escaped))
                    .add(users::Column::FirstName.contains(&escaped))
                    .add(users::Column::LastName.contains(&escaped)),
            );
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        select = select.order_by_asc(Column::StudentNumber);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生页数失败: {e}")))?;

        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        let mut items = Vec::with_capacity(profiles.len());
        for model in profiles {
            items.push(self.build_student_detail(model.into_student_profile()).await?);
        }

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 科目的有效选课学生，按学号排序
    pub async fn list_subject_students_impl(&self, subject_id: i64) -> Result<Vec<StudentDetail>> {
        let student_ids: Vec<i64> = Enrollments::find()
            .select_only()
            .column(enrollments::Column::StudentId)
            .filter(enrollments::Column::SubjectId.eq(subject_id))
            .filter(enrollments::Column::IsActive.eq(true))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课学生失败: {e}")))?;

        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let profiles = StudentProfiles::find()
            .filter(Column::Id.is_in(student_ids))
            .order_by_asc(Column::StudentNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生档案失败: {e}")))?;

        let mut items = Vec::with_capacity(profiles.len());
        for model in profiles {
            items.push(self.build_student_detail(model.into_student_profile()).await?);
        }
        Ok(items)
    }

    /// 更新学生档案
    pub async fn update_student_profile_impl(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>> {
        if self.get_student_profile_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(student_number) = update.student_number {
            model.student_number = Set(student_number.trim().to_string());
        }
        if update.clear_class {
            model.class_id = Set(None);
        } else if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(admission_date) = update.admission_date {
            model.admission_date = Set(format_date(admission_date));
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(guardian_name.trim().to_string());
        }
        if let Some(guardian_phone) = update.guardian_phone {
            model.guardian_phone = Set(guardian_phone);
        }
        if let Some(guardian_email) = update.guardian_email {
            model.guardian_email = Set(Some(guardian_email).filter(|e| !e.is_empty()));
        }
        if let Some(emergency_contact) = update.emergency_contact {
            model.emergency_contact = Set(emergency_contact);
        }
        if let Some(medical_info) = update.medical_info {
            model.medical_info = Set(Some(medical_info).filter(|m| !m.is_empty()));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新学生档案失败: {e}")))?;

        self.get_student_profile_by_id_impl(id).await
    }

    pub async fn delete_student_profile_impl(&self, id: i64) -> Result<bool> {
        let result = StudentProfiles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生档案失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

//! 仪表盘统计

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::models::{dashboards::AdminDashboard, users::UserRole};

impl SeaOrmStorage {
    pub async fn get_admin_dashboard_impl(&self) -> Result<AdminDashboard> {
        Ok(AdminDashboard {
            total_users: self.count_users_impl().await?,
            total_admins: self.count_users_by_role_impl(UserRole::Admin).await?,
            total_teachers: self.count_users_by_role_impl(UserRole::Teacher).await?,
            total_students: self.count_users_by_role_impl(UserRole::Student).await?,
            total_classes: self.count_classes_impl().await?,
            total_subjects: self.count_subjects_impl().await?,
            active_enrollments: self.count_all_active_enrollments_impl().await?,
        })
    }
}

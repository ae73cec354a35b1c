pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::access::current_teacher_profile;
use super::{internal_error, json_error};
use crate::models::ErrorCode;
use crate::models::schedules::{
    CreateScheduleRequest, ScheduleQueryParams, TeacherSchedule, UpdateScheduleRequest,
};
use crate::models::users::{User, UserRole};
use crate::storage::Storage;

pub const MAX_ROOM_NUMBER_LENGTH: usize = 20;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

/// 确定课表归属的教师档案
///
/// 教师只能操作自己的课表，管理员必须指定 teacher_id
pub(crate) async fn resolve_teacher_id(
    storage: &Arc<dyn Storage>,
    user: &User,
    requested: Option<i64>,
) -> ActixResult<i64> {
    if user.role == UserRole::Admin {
        let Some(teacher_id) = requested else {
            return Err(json_error(
                StatusCode::BAD_REQUEST,
                ErrorCode::ScheduleInvalid,
                "teacher_id is required",
            ));
        };
        return match storage.get_teacher_profile_by_id(teacher_id).await {
            Ok(Some(profile)) => Ok(profile.id),
            Ok(None) => Err(json_error(
                StatusCode::NOT_FOUND,
                ErrorCode::TeacherProfileNotFound,
                "Teacher profile not found",
            )),
            Err(e) => Err(internal_error("Failed to load teacher", e)),
        };
    }

    let profile = current_teacher_profile(storage, user).await?;
    match requested {
        Some(teacher_id) if teacher_id != profile.id => Err(json_error(
            StatusCode::FORBIDDEN,
            ErrorCode::Forbidden,
            "You can only manage your own schedule",
        )),
        _ => Ok(profile.id),
    }
}

/// 读取课表并检查归属
pub(crate) async fn load_owned_schedule(
    storage: &Arc<dyn Storage>,
    user: &User,
    schedule_id: i64,
) -> ActixResult<TeacherSchedule> {
    let schedule = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            return Err(json_error(
                StatusCode::NOT_FOUND,
                ErrorCode::ScheduleNotFound,
                "Schedule not found",
            ));
        }
        Err(e) => return Err(internal_error("Failed to load schedule", e)),
    };
    resolve_teacher_id(storage, user, Some(schedule.teacher_id)).await?;
    Ok(schedule)
}

/// 课表上的科目必须由该教师任教
pub(crate) async fn ensure_subject_taught_by(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
    teacher_id: i64,
) -> ActixResult<()> {
    let subject = super::access::load_subject(storage, subject_id).await?;
    if subject.teacher_id != Some(teacher_id) {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            ErrorCode::ScheduleInvalid,
            "Subject is not taught by this teacher",
        ));
    }
    Ok(())
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        schedule_data: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, schedule_data).await
    }

    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        query: ScheduleQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, query).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        update_data: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, request, schedule_id, update_data).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, schedule_id).await
    }
}

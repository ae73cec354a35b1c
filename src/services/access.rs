//! 服务层共用的档案解析与科目权限检查

use actix_web::{Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{internal_error, json_error};
use crate::models::{
    ErrorCode,
    students::StudentProfile,
    subjects::Subject,
    teachers::TeacherProfile,
    users::{User, UserRole},
};
use crate::storage::Storage;

pub const STUDENT_PROFILE_MISSING: &str = "Student profile not found. Please contact administrator.";
pub const TEACHER_PROFILE_MISSING: &str = "Teacher profile not found. Please contact administrator.";

pub(crate) async fn current_student_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> ActixResult<StudentProfile> {
    match storage.get_student_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            ErrorCode::StudentProfileNotFound,
            STUDENT_PROFILE_MISSING,
        )),
        Err(e) => Err(internal_error("Failed to load student profile", e)),
    }
}

pub(crate) async fn current_teacher_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> ActixResult<TeacherProfile> {
    match storage.get_teacher_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            ErrorCode::TeacherProfileNotFound,
            TEACHER_PROFILE_MISSING,
        )),
        Err(e) => Err(internal_error("Failed to load teacher profile", e)),
    }
}

pub(crate) async fn load_subject(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
) -> ActixResult<Subject> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(subject),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )),
        Err(e) => Err(internal_error("Failed to load subject", e)),
    }
}

pub(crate) async fn load_student_profile(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> ActixResult<StudentProfile> {
    match storage.get_student_profile_by_id(student_id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            ErrorCode::StudentProfileNotFound,
            "Student profile not found",
        )),
        Err(e) => Err(internal_error("Failed to load student profile", e)),
    }
}

/// 科目任课教师或管理员才能操作考勤与成绩
///
/// 返回用于 `marked_by` / `graded_by` 的教师档案 ID，管理员为 None
pub(crate) async fn authorize_subject_staff(
    storage: &Arc<dyn Storage>,
    user: &User,
    subject: &Subject,
) -> ActixResult<Option<i64>> {
    if user.role == UserRole::Admin {
        return Ok(None);
    }
    let teacher = current_teacher_profile(storage, user).await?;
    if subject.teacher_id == Some(teacher.id) {
        Ok(Some(teacher.id))
    } else {
        Err(json_error(
            StatusCode::FORBIDDEN,
            ErrorCode::SubjectPermissionDenied,
            "You are not assigned to this subject",
        ))
    }
}

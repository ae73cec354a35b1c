//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod dashboards;
mod enrollments;
mod grades;
mod notes;
mod schedules;
mod students;
mod subjects;
mod teachers;
mod users;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::AppConfig;
use crate::errors::{SchoolError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存 SQLite，单连接以保证所有查询落在同一个库上
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        // SQLite 默认不启用外键，级联删除依赖它
        let opt = opt.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{
        entities::Attendance,
        requests::{AttendanceEntry, AttendanceListQuery},
        responses::{AttendanceListResponse, AttendanceReport, MarkAttendanceResponse},
    },
    classes::{
        entities::{Class, ClassDetail},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    dashboards::AdminDashboard,
    enrollments::{EnrolledSubject, Enrollment, EnrollmentOutcome, UnenrollmentOutcome},
    grades::{
        entities::{Grade, GradeType},
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::{GradeListResponse, GradeReport},
    },
    notes::{CreateNoteRequest, StudentNote},
    schedules::{CreateScheduleRequest, TeacherSchedule, UpdateScheduleRequest, Weekday},
    students::{
        entities::{StudentDetail, StudentProfile},
        requests::{
            CreateStudentProfileRequest, StudentListQuery, StudentListResponse,
            UpdateStudentProfileRequest,
        },
    },
    subjects::{
        entities::{Subject, SubjectDetail},
        requests::{CreateSubjectRequest, SubjectListQuery, SubjectListResponse, UpdateSubjectRequest},
    },
    teachers::{
        entities::{TeacherDetail, TeacherProfile},
        requests::{
            CreateTeacherProfileRequest, TeacherListQuery, TeacherListResponse,
            UpdateTeacherProfileRequest,
        },
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>> {
        self.get_class_by_name_impl(name).await
    }

    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        self.get_class_detail_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(code).await
    }

    async fn get_subject_by_name_and_class(
        &self,
        name: &str,
        class_id: i64,
    ) -> Result<Option<Subject>> {
        self.get_subject_by_name_and_class_impl(name, class_id)
            .await
    }

    async fn get_subject_detail(&self, subject_id: i64) -> Result<Option<SubjectDetail>> {
        self.get_subject_detail_impl(subject_id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_teacher_subjects(
        &self,
        teacher_id: i64,
        active_only: bool,
    ) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(teacher_id, active_only)
            .await
    }

    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(subject_id, update).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    // 学生档案模块
    async fn create_student_profile(
        &self,
        profile: CreateStudentProfileRequest,
    ) -> Result<StudentProfile> {
        self.create_student_profile_impl(profile).await
    }

    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_id_impl(id).await
    }

    async fn get_student_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_user_id_impl(user_id).await
    }

    async fn get_student_profile_by_number(
        &self,
        student_number: &str,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_number_impl(student_number)
            .await
    }

    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>> {
        self.get_student_detail_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_subject_students(&self, subject_id: i64) -> Result<Vec<StudentDetail>> {
        self.list_subject_students_impl(subject_id).await
    }

    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>> {
        self.update_student_profile_impl(id, update).await
    }

    async fn delete_student_profile(&self, id: i64) -> Result<bool> {
        self.delete_student_profile_impl(id).await
    }

    // 教师档案模块
    async fn create_teacher_profile(
        &self,
        profile: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile> {
        self.create_teacher_profile_impl(profile).await
    }

    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_id_impl(id).await
    }

    async fn get_teacher_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_user_id_impl(user_id).await
    }

    async fn get_teacher_profile_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_employee_id_impl(employee_id)
            .await
    }

    async fn get_teacher_detail(&self, id: i64) -> Result<Option<TeacherDetail>> {
        self.get_teacher_detail_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>> {
        self.update_teacher_profile_impl(id, update).await
    }

    async fn delete_teacher_profile(&self, id: i64) -> Result<bool> {
        self.delete_teacher_profile_impl(id).await
    }

    // 选课模块
    async fn enroll_student(
        &self,
        student: &StudentProfile,
        subject: &Subject,
        max_active: u64,
    ) -> Result<EnrollmentOutcome> {
        self.enroll_student_impl(student, subject, max_active).await
    }

    async fn unenroll_student(
        &self,
        student_id: i64,
        subject: &Subject,
    ) -> Result<UnenrollmentOutcome> {
        self.unenroll_student_impl(student_id, subject).await
    }

    async fn get_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, subject_id).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrolledSubject>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn list_available_subjects(&self, student: &StudentProfile) -> Result<Vec<Subject>> {
        self.list_available_subjects_impl(student).await
    }

    async fn count_active_enrollments(&self, student_id: i64) -> Result<u64> {
        self.count_active_enrollments_impl(student_id).await
    }

    async fn count_subject_enrollments(&self, subject_id: i64) -> Result<u64> {
        self.count_subject_enrollments_impl(subject_id).await
    }

    async fn find_unenrolled_students(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        self.find_unenrolled_students_impl(subject_id, student_ids)
            .await
    }

    // 考勤模块
    async fn mark_attendance(
        &self,
        subject_id: i64,
        date: NaiveDate,
        entries: Vec<AttendanceEntry>,
        marked_by: Option<i64>,
    ) -> Result<MarkAttendanceResponse> {
        self.mark_attendance_impl(subject_id, date, entries, marked_by)
            .await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Attendance>> {
        self.list_student_attendance_impl(student_id, since).await
    }

    async fn subject_attendance_report(
        &self,
        subject_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceReport> {
        self.subject_attendance_report_impl(subject_id, date_from, date_to)
            .await
    }

    async fn count_subject_attendance_on(
        &self,
        subject_id: i64,
        date: NaiveDate,
    ) -> Result<(u64, u64)> {
        self.count_subject_attendance_on_impl(subject_id, date)
            .await
    }

    // 成绩模块
    async fn create_grade(
        &self,
        grade: CreateGradeRequest,
        graded_by: Option<i64>,
    ) -> Result<Grade> {
        self.create_grade_impl(grade, graded_by).await
    }

    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(grade_id).await
    }

    async fn find_grade(
        &self,
        student_id: i64,
        subject_id: i64,
        title: &str,
        grade_type: GradeType,
    ) -> Result<Option<Grade>> {
        self.find_grade_impl(student_id, subject_id, title, grade_type)
            .await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_student_published_grades(
        &self,
        student_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Grade>> {
        self.list_student_published_grades_impl(student_id, subject_id)
            .await
    }

    async fn subject_grade_report(&self, subject_id: i64) -> Result<GradeReport> {
        self.subject_grade_report_impl(subject_id).await
    }

    async fn count_subject_grades(&self, subject_id: i64) -> Result<(u64, u64)> {
        self.count_subject_grades_impl(subject_id).await
    }

    async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        graded_by: Option<i64>,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(grade_id, update, graded_by).await
    }

    async fn delete_grade(&self, grade_id: i64) -> Result<bool> {
        self.delete_grade_impl(grade_id).await
    }

    // 学生备注模块
    async fn create_note(
        &self,
        student_id: i64,
        created_by: i64,
        note: CreateNoteRequest,
    ) -> Result<StudentNote> {
        self.create_note_impl(student_id, created_by, note).await
    }

    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<StudentNote>> {
        self.get_note_by_id_impl(note_id).await
    }

    async fn list_student_notes(
        &self,
        student_id: i64,
        include_private: bool,
    ) -> Result<Vec<StudentNote>> {
        self.list_student_notes_impl(student_id, include_private)
            .await
    }

    async fn delete_note(&self, note_id: i64) -> Result<bool> {
        self.delete_note_impl(note_id).await
    }

    // 教师课表模块
    async fn create_schedule(
        &self,
        teacher_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<TeacherSchedule> {
        self.create_schedule_impl(teacher_id, schedule).await
    }

    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<TeacherSchedule>> {
        self.get_schedule_by_id_impl(schedule_id).await
    }

    async fn find_schedule_slot(
        &self,
        teacher_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
    ) -> Result<Option<TeacherSchedule>> {
        self.find_schedule_slot_impl(teacher_id, weekday, start_time)
            .await
    }

    async fn list_schedules(
        &self,
        teacher_id: Option<i64>,
        weekday: Option<Weekday>,
    ) -> Result<Vec<TeacherSchedule>> {
        self.list_schedules_impl(teacher_id, weekday).await
    }

    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>> {
        self.update_schedule_impl(schedule_id, update).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }

    // 仪表盘
    async fn get_admin_dashboard(&self) -> Result<AdminDashboard> {
        self.get_admin_dashboard_impl().await
    }
}

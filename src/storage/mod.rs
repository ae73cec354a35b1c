use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段需已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息（登录）
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>>;
    // 班级及学生数、科目数
    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>>;
    // 同一班级内科目名唯一
    async fn get_subject_by_name_and_class(
        &self,
        name: &str,
        class_id: i64,
    ) -> Result<Option<Subject>>;
    async fn get_subject_detail(&self, subject_id: i64) -> Result<Option<SubjectDetail>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    // 教师任教的科目
    async fn list_teacher_subjects(&self, teacher_id: i64, active_only: bool)
    -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;

    /// 学生档案方法
    async fn create_student_profile(
        &self,
        profile: CreateStudentProfileRequest,
    ) -> Result<StudentProfile>;
    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>>;
    async fn get_student_profile_by_user_id(&self, user_id: i64)
    -> Result<Option<StudentProfile>>;
    async fn get_student_profile_by_number(
        &self,
        student_number: &str,
    ) -> Result<Option<StudentProfile>>;
    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 科目的有效选课学生
    async fn list_subject_students(&self, subject_id: i64) -> Result<Vec<StudentDetail>>;
    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>>;
    async fn delete_student_profile(&self, id: i64) -> Result<bool>;

    /// 教师档案方法
    async fn create_teacher_profile(
        &self,
        profile: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile>;
    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>>;
    async fn get_teacher_profile_by_user_id(&self, user_id: i64)
    -> Result<Option<TeacherProfile>>;
    async fn get_teacher_profile_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<TeacherProfile>>;
    async fn get_teacher_detail(&self, id: i64) -> Result<Option<TeacherDetail>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>>;
    async fn delete_teacher_profile(&self, id: i64) -> Result<bool>;

    /// 选课方法
    // 在同一事务中完成检查与写入
    async fn enroll_student(
        &self,
        student: &StudentProfile,
        subject: &Subject,
        max_active: u64,
    ) -> Result<EnrollmentOutcome>;
    async fn unenroll_student(&self, student_id: i64, subject: &Subject)
    -> Result<UnenrollmentOutcome>;
    async fn get_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Option<Enrollment>>;
    // 有效选课，按选课时间倒序
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrolledSubject>>;
    // 本班有效科目中尚未选修的
    async fn list_available_subjects(&self, student: &StudentProfile) -> Result<Vec<Subject>>;
    async fn count_active_enrollments(&self, student_id: i64) -> Result<u64>;
    async fn count_subject_enrollments(&self, subject_id: i64) -> Result<u64>;
    // 批量记录中不在该科目有效选课内的学生
    async fn find_unenrolled_students(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>>;

    /// 考勤方法
    // 按 (学生, 科目, 日期) 插入或更新
    async fn mark_attendance(
        &self,
        subject_id: i64,
        date: NaiveDate,
        entries: Vec<AttendanceEntry>,
        marked_by: Option<i64>,
    ) -> Result<MarkAttendanceResponse>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    // since 为空时返回全部记录
    async fn list_student_attendance(
        &self,
        student_id: i64,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Attendance>>;
    async fn subject_attendance_report(
        &self,
        subject_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceReport>;
    // 返回 (已记录人数, 出勤人数)
    async fn count_subject_attendance_on(
        &self,
        subject_id: i64,
        date: NaiveDate,
    ) -> Result<(u64, u64)>;

    /// 成绩方法
    async fn create_grade(&self, grade: CreateGradeRequest, graded_by: Option<i64>)
    -> Result<Grade>;
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    // 同一学生、科目下 (标题, 类型) 唯一
    async fn find_grade(
        &self,
        student_id: i64,
        subject_id: i64,
        title: &str,
        grade_type: GradeType,
    ) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn list_student_published_grades(
        &self,
        student_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Grade>>;
    async fn subject_grade_report(&self, subject_id: i64) -> Result<GradeReport>;
    // 返回 (成绩总数, 已发布数)
    async fn count_subject_grades(&self, subject_id: i64) -> Result<(u64, u64)>;
    async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        graded_by: Option<i64>,
    ) -> Result<Option<Grade>>;
    async fn delete_grade(&self, grade_id: i64) -> Result<bool>;

    /// 学生备注方法
    async fn create_note(
        &self,
        student_id: i64,
        created_by: i64,
        note: CreateNoteRequest,
    ) -> Result<StudentNote>;
    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<StudentNote>>;
    async fn list_student_notes(
        &self,
        student_id: i64,
        include_private: bool,
    ) -> Result<Vec<StudentNote>>;
    async fn delete_note(&self, note_id: i64) -> Result<bool>;

    /// 教师课表方法
    async fn create_schedule(
        &self,
        teacher_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<TeacherSchedule>;
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<TeacherSchedule>>;
    async fn find_schedule_slot(
        &self,
        teacher_id: i64,
        weekday: Weekday,
        start_time: chrono::NaiveTime,
    ) -> Result<Option<TeacherSchedule>>;
    // 按 (星期, 开始时间) 排序
    async fn list_schedules(
        &self,
        teacher_id: Option<i64>,
        weekday: Option<Weekday>,
    ) -> Result<Vec<TeacherSchedule>>;
    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>>;
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;

    /// 仪表盘统计
    async fn get_admin_dashboard(&self) -> Result<AdminDashboard>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

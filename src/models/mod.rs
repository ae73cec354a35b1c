pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod dashboards;
pub mod enrollments;
pub mod grades;
pub mod notes;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 按模块分段：通用 0-1xxx，用户 2xxx，班级 3xxx，科目 4xxx，档案 5xxx，
/// 选课 6xxx，考勤 7xxx，成绩 8xxx，备注/课表 9xxx
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1006,
    AuthFailed = 1010,
    AccountDisabled = 1011,

    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserCreationFailed = 2005,
    UserUpdateFailed = 2006,
    UserDeleteFailed = 2007,
    CanNotDeleteCurrentUser = 2008,
    UserNameAlreadyExists = 2009,
    UserEmailAlreadyExists = 2010,
    UserPhoneInvalid = 2011,

    ClassNotFound = 3000,
    ClassAlreadyExists = 3001,
    ClassCreationFailed = 3002,
    ClassUpdateFailed = 3003,
    ClassDeleteFailed = 3004,
    ClassCapacityExceeded = 3005,
    ClassInvalid = 3006,

    SubjectNotFound = 4000,
    SubjectAlreadyExists = 4001,
    SubjectCreationFailed = 4002,
    SubjectUpdateFailed = 4003,
    SubjectDeleteFailed = 4004,
    SubjectInvalid = 4005,
    SubjectPermissionDenied = 4006,

    StudentProfileNotFound = 5000,
    StudentProfileAlreadyExists = 5001,
    TeacherProfileNotFound = 5002,
    TeacherProfileAlreadyExists = 5003,
    ProfileRoleMismatch = 5004,
    ProfileInvalid = 5005,

    EnrollmentNotAllowed = 6000,
    EnrollmentLimitReached = 6001,
    AlreadyEnrolled = 6002,
    NotEnrolled = 6003,
    MandatorySubject = 6004,
    SubjectInactive = 6005,
    SubjectNotInClass = 6006,

    AttendanceInvalid = 7000,
    AttendanceNotFound = 7001,

    GradeNotFound = 8000,
    GradeInvalid = 8001,
    GradeAlreadyExists = 8002,

    NoteNotFound = 9000,
    NoteInvalid = 9001,
    ScheduleNotFound = 9100,
    ScheduleConflict = 9101,
    ScheduleInvalid = 9102,
}

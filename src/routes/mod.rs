pub mod attendance;

pub mod auth;

pub mod classes;

pub mod dashboards;

pub mod enrollments;

pub mod grades;

pub mod notes;

pub mod schedules;

pub mod students;

pub mod subjects;

pub mod teachers;

pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboards::configure_dashboards_routes;
pub use enrollments::configure_enrollments_routes;
pub use grades::configure_grades_routes;
pub use notes::configure_notes_routes;
pub use schedules::configure_schedules_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use teachers::configure_teachers_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_classes_routes)
        .configure(configure_subjects_routes)
        .configure(configure_students_routes)
        .configure(configure_teachers_routes)
        .configure(configure_enrollments_routes)
        .configure(configure_attendance_routes)
        .configure(configure_grades_routes)
        .configure(configure_notes_routes)
        .configure(configure_schedules_routes)
        .configure(configure_dashboards_routes);
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{AttendanceQueryParams, AttendanceReportParams};
use crate::models::grades::requests::GradeQueryParams;
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectQueryParams, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{AttendanceService, GradeService, SubjectService};
use crate::utils::SafeIDI64;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, subject_id.0).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeIDI64,
    update_data: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, subject_id.0, update_data.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, subject_id.0).await
}

pub async fn list_subject_students(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_subject_students(&req, subject_id.0)
        .await
}

pub async fn list_subject_attendance(
    req: HttpRequest,
    subject_id: SafeIDI64,
    query: web::Query<AttendanceQueryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_subject_attendance(&req, subject_id.0, query.into_inner())
        .await
}

pub async fn subject_attendance_report(
    req: HttpRequest,
    subject_id: SafeIDI64,
    query: web::Query<AttendanceReportParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .subject_report(&req, subject_id.0, query.into_inner())
        .await
}

pub async fn list_subject_grades(
    req: HttpRequest,
    subject_id: SafeIDI64,
    query: web::Query<GradeQueryParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_subject_grades(&req, subject_id.0, query.into_inner())
        .await
}

pub async fn subject_grade_report(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.subject_report(&req, subject_id.0).await
}

pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_subjects)).route(
                    web::post()
                        .to(create_subject)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_subject))
                    .route(
                        web::put()
                            .to(update_subject)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            // 任课教师或管理员，具体科目权限在服务层检查
            .service(
                web::scope("/{id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("/students", web::get().to(list_subject_students))
                    .route("/attendance", web::get().to(list_subject_attendance))
                    .route("/attendance/report", web::get().to(subject_attendance_report))
                    .route("/grades", web::get().to(list_subject_grades))
                    .route("/grades/report", web::get().to(subject_grade_report)),
            ),
    );
}

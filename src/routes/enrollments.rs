use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_overview(&req).await
}

pub async fn list_available(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_available(&req).await
}

pub async fn enroll(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(&req, subject_id.0).await
}

pub async fn unenroll(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(&req, subject_id.0).await
}

// 路径中的 id 为科目 ID
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_overview))
            .route("/available", web::get().to(list_available))
            .route("/{id}", web::post().to(enroll))
            .route("/{id}", web::delete().to(unenroll)),
    );
}

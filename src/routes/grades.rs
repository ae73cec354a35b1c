use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{CreateGradeRequest, UpdateGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeIDI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, grade_data.into_inner()).await
}

pub async fn update_grade(
    req: HttpRequest,
    grade_id: SafeIDI64,
    update_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(&req, grade_id.0, update_data.into_inner())
        .await
}

pub async fn delete_grade(req: HttpRequest, grade_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(&req, grade_id.0).await
}

pub async fn get_my_grades(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_my_grades(&req).await
}

// 路径中的 id 为科目 ID
pub async fn get_my_subject_grades(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_my_subject_grades(&req, subject_id.0).await
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/me")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route("", web::get().to(get_my_grades))
                    .route("/{id}", web::get().to(get_my_subject_grades)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_grade))
                    .route("/{id}", web::put().to(update_grade))
                    .route("/{id}", web::delete().to(delete_grade)),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notes::CreateNoteRequest;
use crate::models::students::requests::{
    CreateStudentProfileRequest, StudentListParams, UpdateStudentProfileRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{NoteService, StudentService};
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    profile_data: web::Json<CreateStudentProfileRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, profile_data.into_inner())
        .await
}

pub async fn get_my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_my_profile(&req).await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeIDI64,
    update_data: web::Json<UpdateStudentProfileRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn list_notes(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.list_student_notes(&req, student_id.0).await
}

pub async fn create_note(
    req: HttpRequest,
    student_id: SafeIDI64,
    note_data: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .create_note(&req, student_id.0, note_data.into_inner())
        .await
}

pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            // 需在 /{id} 之前注册
            .service(
                web::resource("/me").route(
                    web::get()
                        .to(get_my_profile)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .service(
                web::resource("/{id}/notes")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(list_notes))
                    .route(web::post().to(create_note)),
            ),
    );
}

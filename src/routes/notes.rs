use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::NoteService;
use crate::utils::SafeIDI64;

static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn list_my_notes(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.list_my_notes(&req).await
}

pub async fn delete_note(req: HttpRequest, note_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.delete_note(&req, note_id.0).await
}

// 创建与按学生查询见 students 路由
pub fn configure_notes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/me").route(
                    web::get()
                        .to(list_my_notes)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{id}").route(
                    web::delete()
                        .to(delete_note)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}

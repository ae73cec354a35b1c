use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn admin_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin_dashboard(&req).await
}

pub async fn teacher_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&req).await
}

pub async fn student_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student_dashboard(&req).await
}

// 登录响应中的 redirect_to 指向这里
pub fn configure_dashboards_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/admin")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route(web::get().to(admin_dashboard)),
            )
            .service(
                web::resource("/teacher")
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
                    .route(web::get().to(teacher_dashboard)),
            )
            .service(
                web::resource("/student")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route(web::get().to(student_dashboard)),
            ),
    );
}

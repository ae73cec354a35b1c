/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，
 * 通过后把当前用户写入请求扩展，供后续中间件与处理器读取。
 *
 * ```rust,ignore
 * web::scope("/api/v1/subjects")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_subjects))
 * ```
 *
 * 用户信息按 `user:{id}` 缓存在 ObjectCache 中，用户被修改或删除时由服务层清除。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败原因
#[derive(Debug)]
enum AuthFailure {
    Unauthorized(&'static str),
    Disabled,
    Internal(&'static str),
}

impl AuthFailure {
    fn status(&self) -> StatusCode {
        match self {
            AuthFailure::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthFailure::Disabled => StatusCode::FORBIDDEN,
            AuthFailure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AuthFailure::Unauthorized(_) => ErrorCode::Unauthorized,
            AuthFailure::Disabled => ErrorCode::AccountDisabled,
            AuthFailure::Internal(_) => ErrorCode::InternalServerError,
        }
    }

    fn message(&self) -> String {
        match self {
            AuthFailure::Unauthorized(reason) => format!("Unauthorized: {reason}"),
            AuthFailure::Disabled => "Account is disabled".to_string(),
            AuthFailure::Internal(reason) => reason.to_string(),
        }
    }
}

pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = bearer_token(req)
        .ok_or(AuthFailure::Unauthorized("Missing or invalid Authorization header"))?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token")
    })?;

    let user_id = claims
        .user_id()
        .ok_or(AuthFailure::Unauthorized("Invalid user ID in JWT"))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Cache not configured"))?;
    let cache_key = user_cache_key(user_id);

    let cached = match cache.get_raw(&cache_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => Some(user),
            Err(_) => {
                cache.remove(&cache_key).await;
                debug!("Dropped undecodable cached user {}", user_id);
                None
            }
        },
        _ => None,
    };

    let user = match cached {
        Some(user) => user,
        None => {
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
                .ok_or(AuthFailure::Internal("Storage not configured"))?;

            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|_| AuthFailure::Internal("Failed to retrieve user from storage"))?
                .ok_or(AuthFailure::Unauthorized("User not found"))?;

            // 序列化时会跳过密码哈希
            if let Ok(user_json) = serde_json::to_string(&user) {
                cache
                    .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
                    .await;
            }
            user
        }
    };

    if !user.is_active() {
        return Err(AuthFailure::Disabled);
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    info!(
                        "JWT authentication failed for request to {}: {:?}",
                        req.path(),
                        failure
                    );
                    Ok(req.into_response(
                        create_error_response(
                            failure.status(),
                            failure.code(),
                            &failure.message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前登录用户，需在应用了 RequireJWT 的路由中调用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_mapping() {
        let disabled = AuthFailure::Disabled;
        assert_eq!(disabled.status(), StatusCode::FORBIDDEN);
        assert_eq!(disabled.code() as i32, ErrorCode::AccountDisabled as i32);

        let missing = AuthFailure::Unauthorized("Missing or invalid Authorization header");
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            missing.message(),
            "Unauthorized: Missing or invalid Authorization header"
        );
    }

    #[test]
    fn test_user_cache_key() {
        assert_eq!(user_cache_key(42), "user:42");
    }
}

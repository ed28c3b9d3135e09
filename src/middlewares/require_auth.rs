/*!
 * 认证中间件
 *
 * 会话与身份由外部身份服务负责；此中间件只校验请求携带的 Bearer JWT，
 * 解析出受信主体（用户 ID + 角色）放进请求扩展，供各服务直接使用。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * web::scope("/api/v1/assignments")
 *     .wrap(RequireAuth)
 *     .route("", web::get().to(list_assignments))
 * ```
 *
 * 2. 在处理程序中提取主体：
 * ```rust,ignore
 * if let Some(user) = RequireAuth::extract_user(&req) {
 *     // user.id / user.role
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件校验令牌签名与有效期
 * 3. 通过缓存（未命中则回源数据库）解析用户记录，存入请求扩展
 * 4. 令牌无效或用户不存在时返回 401
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::info;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

// 主体缓存键前缀；TTL 用缓存后端默认值
const USER_CACHE_KEY_PREFIX: &str = "auth:user:";

#[derive(Clone)]
pub struct RequireAuth;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::Unauthorized,
            message,
        ))
}

// 辅助函数：提取并校验 JWT，解析受信主体
async fn extract_and_validate_principal(req: &ServiceRequest) -> Result<User, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    // 优先查缓存
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    let cache_key = format!("{USER_CACHE_KEY_PREFIX}{}", claims.sub);

    if let Some(cache) = &cache
        && let CacheResult::Found(user) = cache.as_ref().get::<User>(&cache_key).await
    {
        return Ok(user);
    }

    // 回源数据库
    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(claims.sub)
        .await
        .map_err(|e| format!("Failed to load principal: {e}"))?
        .ok_or_else(|| "Principal no longer exists".to_string())?;

    if let Some(cache) = &cache {
        cache.as_ref().insert(cache_key, &user, 0).await;
    }

    Ok(user)
}

impl RequireAuth {
    /// 从请求扩展中提取受信主体
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取主体用户 ID
    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        Self::extract_user(req).map(|u| u.id)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match extract_and_validate_principal(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(message) => {
                    let response = create_error_response(StatusCode::UNAUTHORIZED, &message)
                        .map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

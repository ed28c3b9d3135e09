use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireAuth};
use crate::models::notifications::requests::NotificationListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::NotificationService;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 辅助函数：提取当前用户 ID
fn current_user_id(req: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireAuth::extract_user_id(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

// 列出我的通知
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    NOTIFICATION_SERVICE
        .list_notifications(&req, user_id, query.into_inner())
        .await
}

// 获取未读通知数量
pub async fn get_unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    NOTIFICATION_SERVICE.get_unread_count(&req, user_id).await
}

// 标记单条通知已读
pub async fn mark_read(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    NOTIFICATION_SERVICE
        .mark_read(&req, path.into_inner(), user_id)
        .await
}

// 标记全部通知已读
pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    NOTIFICATION_SERVICE.mark_all_read(&req, user_id).await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireAuth)
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(get_unread_count))
            .route("/read-all", web::post().to(mark_all_read))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}

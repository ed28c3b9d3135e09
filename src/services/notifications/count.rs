use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, unread_cache_key};
use crate::cache::CacheResult;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 获取未读通知数量
/// GET /notifications/unread-count
///
/// 计数走缓存；通知写入或已读变更时缓存会被删除。
pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = NotificationService::get_cache(request);
    let cache_key = unread_cache_key(user_id);

    if let Some(cache) = &cache
        && let CacheResult::Found(count) = cache.as_ref().get::<i64>(&cache_key).await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse {
                unread_count: count,
            },
            "查询成功",
        )));
    }

    match storage.get_unread_notification_count(user_id).await {
        Ok(count) => {
            if let Some(cache) = &cache {
                cache.as_ref().insert(cache_key, &count, 0).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UnreadCountResponse {
                    unread_count: count,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询未读通知数量失败: {e}"),
            )),
        ),
    }
}

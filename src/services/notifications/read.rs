use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, unread_cache_key};
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 标记单条通知已读
/// POST /notifications/{id}/read
///
/// 幂等：对已读通知重复调用同样返回成功。
pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只有收件人能标记自己的通知
    let notification = match storage.get_notification_by_id(notification_id).await {
        Ok(Some(notification)) => notification,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotificationNotFound,
                "通知不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询通知失败: {e}"),
                )),
            );
        }
    };

    if notification.recipient_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有操作该通知的权限",
        )));
    }

    // 已读是终态，重复标记是无操作
    if notification.is_read {
        return Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已读")));
    }

    match storage.mark_notification_as_read(notification_id).await {
        Ok(_) => {
            if let Some(cache) = NotificationService::get_cache(request) {
                cache.remove(&unread_cache_key(user_id)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已读")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("标记通知已读失败: {e}"),
            )),
        ),
    }
}

/// 标记全部通知已读
/// POST /notifications/read-all
pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user_id).await {
        Ok(marked_count) => {
            if let Some(cache) = NotificationService::get_cache(request) {
                cache.remove(&unread_cache_key(user_id)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkAllReadResponse { marked_count },
                "全部已读",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("标记全部通知已读失败: {e}"),
            )),
        ),
    }
}

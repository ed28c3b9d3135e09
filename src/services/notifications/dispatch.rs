//! 通知派发
//!
//! 先持久化（收件箱是至少一次投递的保证），再尽力推送到在线连接。
//! 推送失败只记录日志；漏推的消息由客户端轮询收件箱补偿。

use actix_web::HttpRequest;
use std::sync::Arc;
use tracing::debug;

use super::{NotificationService, unread_cache_key};
use crate::errors::Result;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::services::websocket;
use crate::storage::Storage;

/// 派发一条通知
///
/// 持久化失败直接向调用方返回错误；持久化成功后的任何推送问题
/// 都不再影响调用结果。
pub async fn dispatch(
    request: &HttpRequest,
    storage: &Arc<dyn Storage>,
    req: CreateNotificationRequest,
) -> Result<Notification> {
    let recipient_id = req.recipient_id;

    // 先入收件箱
    let notification = storage.create_notification(req).await?;

    // 未读计数失效
    if let Some(cache) = NotificationService::get_cache(request) {
        cache.remove(&unread_cache_key(recipient_id)).await;
    }

    // 尽力推送：收件人不在线或通道拥塞都静默接受
    let pushed = websocket::push_notification_to_user(recipient_id, notification.clone());
    debug!(
        "Notification {} dispatched to user {} (live push: {})",
        notification.id,
        recipient_id,
        if pushed { "delivered" } else { "skipped" }
    );

    Ok(notification)
}

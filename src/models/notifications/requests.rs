use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationTopic;

/// 创建通知请求（仅服务内部使用，由派发器组装）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub recipient_id: i64,
    pub topic: NotificationTopic,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub link_url: Option<String>,
}

/// 通知列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}

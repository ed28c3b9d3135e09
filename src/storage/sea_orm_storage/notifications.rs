//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建通知
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        let now = chrono::Utc::now().timestamp();

        let data_json = match &req.data {
            Some(value) => Some(serde_json::to_string(value).map_err(|e| {
                CourseHubError::serialization(format!("序列化通知载荷失败: {e}"))
            })?),
            None => None,
        };

        let model = ActiveModel {
            recipient_id: Set(req.recipient_id),
            topic: Set(req.topic.to_string()),
            title: Set(req.title),
            message: Set(req.message),
            data_json: Set(data_json),
            link_url: Set(req.link_url),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 通过 ID 获取通知
    pub async fn get_notification_by_id_impl(
        &self,
        notification_id: i64,
    ) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(notification_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 列出用户通知（分页）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Notifications::find().filter(Column::RecipientId.eq(user_id));

        // 未读筛选
        if let Some(true) = query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询通知总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询通知页数失败: {e}")))?;

        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 获取用户未读通知数量
    pub async fn get_unread_notification_count_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询未读通知数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记通知为已读
    ///
    /// 幂等：重复标记不报错，rows_affected 为 0 只说明已是已读。
    pub async fn mark_notification_as_read_impl(&self, notification_id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_as_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("标记全部通知已读失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }
}

pub mod count;
pub mod dispatch;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::notifications::requests::NotificationListQuery;
use crate::storage::Storage;

// 未读计数缓存键前缀，通知写入与已读变更时失效
pub(crate) const UNREAD_CACHE_KEY_PREFIX: &str = "notify:unread:";

pub(crate) fn unread_cache_key(user_id: i64) -> String {
    format!("{UNREAD_CACHE_KEY_PREFIX}{user_id}")
}

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|c| c.get_ref().clone())
    }

    /// 列出我的通知
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        user_id: i64,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, user_id, query).await
    }

    /// 获取未读通知数量
    pub async fn get_unread_count(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request, user_id).await
    }

    /// 标记单条通知已读
    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_read(self, request, notification_id, user_id).await
    }

    /// 标记全部通知已读
    pub async fn mark_all_read(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_all_read(self, request, user_id).await
    }
}

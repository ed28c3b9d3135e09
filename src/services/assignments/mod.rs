pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    /// 创建作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        current_user: User,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, current_user, req).await
    }

    /// 获取作业详情
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    /// 更新作业
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    /// 删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    /// 列出作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }
}

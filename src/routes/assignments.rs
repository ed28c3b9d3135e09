use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireAuth};
use crate::models::assignments::requests::{
    AssignmentListParams, AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user = match RequireAuth::extract_user(&req) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .create_assignment(&req, user, body.into_inner())
        .await
}

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    let params = query.into_inner();
    let query = AssignmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        lesson_id: params.lesson_id,
        course_id: params.course_id,
    };

    ASSIGNMENT_SERVICE.list_assignments(&req, query).await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, path.into_inner())
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireAuth)
            .route("", web::get().to(list_assignments))
            .route("", web::post().to(create_assignment))
            .route("/{id}", web::get().to(get_assignment))
            .route("/{id}", web::put().to(update_assignment))
            .route("/{id}", web::delete().to(delete_assignment)),
    );
}

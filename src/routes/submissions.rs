use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireAuth};
use crate::models::submissions::requests::{
    GradeSubmissionRequest, SubmissionListParams, SubmissionListQuery, UpsertSubmissionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交/重交作业
pub async fn upsert_my_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
    body: web::Json<UpsertSubmissionRequest>,
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

    SUBMISSION_SERVICE
        .upsert_submission(&req, path.into_inner(), user, body.into_inner())
        .await
}

// 获取我的当前提交
pub async fn get_my_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    let user_id = match RequireAuth::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SUBMISSION_SERVICE
        .get_my_submission(&req, path.into_inner(), user_id)
        .await
}

// 列出作业提交（讲师批改视角）
pub async fn list_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    let params = query.into_inner();
    let query = SubmissionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        graded: params.graded,
    };

    SUBMISSION_SERVICE
        .list_submissions(&req, path.into_inner(), query)
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 为提交评分
pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
//
// 作业下的提交子路由前缀更长，必须先于 /api/v1/assignments 注册
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submissions")
            .wrap(middlewares::RequireAuth)
            .route("/my", web::put().to(upsert_my_submission))
            .route("/my", web::get().to(get_my_submission))
            .route("", web::get().to(list_submissions)),
    );

    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireAuth)
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}/grade", web::post().to(grade_submission)),
    );
}

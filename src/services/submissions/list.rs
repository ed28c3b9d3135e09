use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireAuth;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;

/// 列出作业提交（讲师批改视角，待评分在前）
/// GET /assignments/{id}/submissions
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireAuth::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let (_assignment, lesson) = match access::assignment_with_lesson(&storage, assignment_id).await
    {
        Ok(pair) => pair,
        Err(resp) => return Ok(resp),
    };

    // 只有课程讲师和 Admin 能查看全部提交
    if let Err(resp) =
        access::require_course_instructor(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    match storage
        .list_submissions_with_pagination(assignment_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}

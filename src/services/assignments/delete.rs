use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireAuth;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;

/// 删除作业
/// DELETE /assignments/{id}
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    if let Err(resp) =
        access::require_course_instructor(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除作业失败: {e}"),
            )),
        ),
    }
}

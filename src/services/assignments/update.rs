use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireAuth;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::utils::validate::validate_title;

/// 更新作业
/// PUT /assignments/{id}
pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireAuth::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 更新也要满足创建时的约束
    if let Some(title) = &req.title
        && !validate_title(title)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "作业标题不能为空",
        )));
    }
    if let Some(max_score) = req.max_score
        && max_score < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            format!("满分必须是不小于 1 的整数: {max_score}"),
        )));
    }

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

    match storage.update_assignment(assignment_id, req).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新作业失败: {e}"),
            )),
        ),
    }
}

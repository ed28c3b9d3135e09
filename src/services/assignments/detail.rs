use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireAuth;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;

/// 获取作业详情
/// GET /assignments/{id}
pub async fn get_assignment(
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

    let (assignment, lesson) = match access::assignment_with_lesson(&storage, assignment_id).await {
        Ok(pair) => pair,
        Err(resp) => return Ok(resp),
    };

    // 课程成员可见
    if let Err(resp) = access::require_course_member(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
}

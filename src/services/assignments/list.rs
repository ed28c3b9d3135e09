use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireAuth;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;

/// 列出作业（按课时或课程筛选）
/// GET /assignments
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireAuth::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 确定授权范围：按课时或课程过滤时要求课程成员，
    // 不带过滤的全量列表仅限 Admin
    if let Some(lesson_id) = query.lesson_id {
        let lesson = match access::lesson_with_course(&storage, lesson_id).await {
            Ok(lesson) => lesson,
            Err(resp) => return Ok(resp),
        };
        if let Err(resp) =
            access::require_course_member(&storage, &current_user, lesson.course_id).await
        {
            return Ok(resp);
        }
    } else if let Some(course_id) = query.course_id {
        if let Err(resp) = access::require_course_member(&storage, &current_user, course_id).await {
            return Ok(resp);
        }
    } else if current_user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "请指定课程或课时",
        )));
    }

    match storage.list_assignments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}

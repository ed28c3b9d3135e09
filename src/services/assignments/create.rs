use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::utils::validate::validate_title;

/// 创建作业
/// POST /assignments
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    current_user: User,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 标题与满分校验
    if !validate_title(&req.title) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "作业标题不能为空",
        )));
    }
    if req.max_score < 1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            format!("满分必须是不小于 1 的整数: {}", req.max_score),
        )));
    }

    // 课时必须存在，且当前用户是所属课程的讲师
    let lesson = match access::lesson_with_course(&storage, req.lesson_id).await {
        Ok(lesson) => lesson,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        access::require_course_instructor(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    match storage.create_assignment(current_user.id, req).await {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "创建成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, build_submission_response};
use crate::models::courses::entities::CourseRole;
use crate::models::submissions::requests::UpsertSubmissionRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::utils::validate::{is_blank, validate_attachment_url};

/// 提交/重交作业
/// PUT /assignments/{id}/submissions/my
///
/// 覆盖语义：同一 (作业, 学生) 只保留一条当前提交，重交会连带清空评分。
/// 截止时间在这里做权威校验；过期请求直接拒绝，不产生任何写入。
pub async fn upsert_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    student: User,
    req: UpsertSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 解析作业与所属课程
    let (assignment, lesson) = match access::assignment_with_lesson(&storage, assignment_id).await {
        Ok(pair) => pair,
        Err(resp) => return Ok(resp),
    };

    // 只有持学生授权的课程成员可以提交
    if student.role != UserRole::Admin {
        let enrollment = match access::require_student_enrollment(
            &storage,
            lesson.course_id,
            student.id,
        )
        .await
        {
            Ok(enrollment) => enrollment,
            Err(resp) => return Ok(resp),
        };
        if enrollment.role != CourseRole::Student {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有学生可以提交作业",
            )));
        }
    }

    // 内容校验：文本与附件至少一项
    if is_blank(&req.text_answer) && is_blank(&req.attachment_url) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionEmpty,
            "提交内容不能为空：请填写文本答案或附件链接",
        )));
    }

    // 附件链接形态校验
    if let Some(url) = req.attachment_url.as_deref()
        && !url.trim().is_empty()
        && !validate_attachment_url(url)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "附件链接格式无效",
        )));
    }

    // 截止时间权威校验：严格晚于截止时刻才拒绝
    if let Some(due_at) = assignment.due_at
        && chrono::Utc::now() > due_at
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DeadlinePassed,
            format!("作业已于 {} 截止，不再接受提交", due_at.to_rfc3339()),
        )));
    }

    match storage
        .upsert_submission(assignment_id, student.id, req)
        .await
    {
        Ok(submission) => {
            let response = build_submission_response(&submission, &assignment, &student);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "提交成功")))
        }
        Err(crate::errors::CourseHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubmissionConflict, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("写入提交失败: {e}"),
            )),
        ),
    }
}

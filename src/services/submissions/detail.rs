use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{SubmissionService, build_submission_response};
use crate::middlewares::RequireAuth;
use crate::models::courses::entities::CourseRole;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::storage::Storage;

/// 检查用户是否有权查看某个提交
///
/// 提交者本人、课程讲师和 Admin 可以查看。
async fn check_submission_access(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    submission: &crate::models::submissions::entities::Submission,
    course_id: i64,
) -> Result<(), HttpResponse> {
    if current_user.role == UserRole::Admin {
        return Ok(());
    }

    if submission.student_id == current_user.id {
        return Ok(());
    }

    match storage.get_enrollment(course_id, current_user.id).await {
        Ok(Some(enrollment)) if enrollment.role == CourseRole::Instructor => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该提交的权限",
        ))),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "您未加入该课程",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询选课记录失败: {e}"),
            )),
        ),
    }
}

/// 获取我的当前提交
/// GET /assignments/{id}/submissions/my
pub async fn get_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
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

    if let Err(resp) = access::require_course_member(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    match storage.get_submission(assignment_id, student_id).await {
        Ok(Some(submission)) => {
            let response = build_submission_response(&submission, &assignment, &current_user);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "尚未提交该作业",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交失败: {e}"),
            )),
        ),
    }
}

/// 获取提交详情
/// GET /submissions/{id}
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireAuth::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    let (assignment, lesson) =
        match access::assignment_with_lesson(&storage, submission.assignment_id).await {
            Ok(pair) => pair,
            Err(resp) => return Ok(resp),
        };

    if let Err(resp) =
        check_submission_access(&storage, &current_user, &submission, lesson.course_id).await
    {
        return Ok(resp);
    }

    // 展示提交者信息
    let student = match storage.get_user_by_id(submission.student_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "提交者不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    let response = build_submission_response(&submission, &assignment, &student);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{SubmissionService, build_submission_response};
use crate::middlewares::RequireAuth;
use crate::models::notifications::entities::NotificationTopic;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::services::notifications::dispatch;

/// 校验评分取值
///
/// 分数必须落在 [0, max_score]；JSON 中的非整数在反序列化时已被拒绝。
pub fn validate_score(score: i32, max_score: i32) -> Result<(), String> {
    if score < 0 {
        return Err(format!("分数不能为负数: {score}"));
    }
    if score > max_score {
        return Err(format!("分数超过满分上限: {score} > {max_score}"));
    }
    Ok(())
}

/// 为提交评分
/// POST /submissions/{id}/grade
///
/// 评分以读取提交时的版本戳为前提写入；并发重交会使版本失效，
/// 此时返回冲突而不是把旧评分附到新内容上。重复评分覆盖旧评分。
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireAuth::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 获取提交
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

    // 解析作业与所属课程
    let (assignment, lesson) =
        match access::assignment_with_lesson(&storage, submission.assignment_id).await {
            Ok(pair) => pair,
            Err(resp) => return Ok(resp),
        };

    // 只有课程讲师和 Admin 能评分
    if let Err(resp) =
        access::require_course_instructor(&storage, &current_user, lesson.course_id).await
    {
        return Ok(resp);
    }

    // 分数边界校验；失败时提交保持原样
    if let Err(message) = validate_score(req.score, assignment.max_score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScoreOutOfRange, message)));
    }

    // 带版本戳写入评分
    let graded = match storage
        .apply_grade(
            submission.id,
            submission.version,
            req.score,
            req.feedback,
            current_user.id,
        )
        .await
    {
        Ok(Some(graded)) => graded,
        Ok(None) => {
            // 版本失效：评分读取后提交被改写（通常是学生重交）
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GradeConflict,
                "提交内容在评分期间被更新，请刷新后重新评分",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("写入评分失败: {e}"),
                )),
            );
        }
    };

    // 评分已落库；通知失败只记录，不影响本次评分结果
    let notification = CreateNotificationRequest {
        recipient_id: graded.student_id,
        topic: NotificationTopic::AssignmentGraded,
        title: "作业已评分".to_string(),
        message: format!(
            "你的作业《{}》已评分：{} / {}",
            assignment.title, req.score, assignment.max_score
        ),
        data: Some(serde_json::json!({
            "assignment_id": assignment.id,
            "submission_id": graded.id,
            "course_id": lesson.course_id,
        })),
        link_url: Some(format!(
            "/courses/{}/assignments/{}",
            lesson.course_id, assignment.id
        )),
    };
    if let Err(e) = dispatch::dispatch(request, &storage, notification).await {
        warn!(
            "Failed to dispatch grading notification for submission {}: {}",
            graded.id, e
        );
    }

    // 展示提交者信息
    let student = match storage.get_user_by_id(graded.student_id).await {
        Ok(Some(user)) => user,
        Ok(None) | Err(_) => current_user,
    };

    let response = build_submission_response(&graded, &assignment, &student);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评分成功")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_within_bounds() {
        assert!(validate_score(0, 100).is_ok());
        assert!(validate_score(85, 100).is_ok());
        // 满分恰好可用
        assert!(validate_score(100, 100).is_ok());
    }

    #[test]
    fn test_score_exceeds_max() {
        assert!(validate_score(101, 100).is_err());
        assert!(validate_score(1, 0).is_err());
    }

    #[test]
    fn test_negative_score_rejected() {
        assert!(validate_score(-1, 100).is_err());
        assert!(validate_score(i32::MIN, 100).is_err());
    }
}

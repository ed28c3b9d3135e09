//! 服务层共用的访问控制辅助函数
//!
//! 身份由认证中间件解析并受信；这里只做课程维度的授权判断。
//! 失败分支直接构造 HTTP 响应，调用方原样返回。

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::{CourseRole, Enrollment};
use crate::models::lessons::entities::Lesson;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 解析课时并返回其所属课程 ID
pub(crate) async fn lesson_with_course(
    storage: &Arc<dyn Storage>,
    lesson_id: i64,
) -> Result<Lesson, HttpResponse> {
    match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => Ok(lesson),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "课时不存在",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询课时失败: {e}"),
            )),
        ),
    }
}

/// 解析作业及其所属课时
pub(crate) async fn assignment_with_lesson(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<(Assignment, Lesson), HttpResponse> {
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    let lesson = lesson_with_course(storage, assignment.lesson_id).await?;
    Ok((assignment, lesson))
}

/// 查询用户在课程中的授权记录
async fn enrollment_of(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user_id: i64,
) -> Result<Option<Enrollment>, HttpResponse> {
    storage.get_enrollment(course_id, user_id).await.map_err(|e| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("查询选课记录失败: {e}"),
        ))
    })
}

/// 要求当前用户是课程成员（任意角色）；Admin 直接放行
pub(crate) async fn require_course_member(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    course_id: i64,
) -> Result<(), HttpResponse> {
    if current_user.role == UserRole::Admin {
        return Ok(());
    }

    match enrollment_of(storage, course_id, current_user.id).await? {
        Some(_) => Ok(()),
        None => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "您未加入该课程",
        ))),
    }
}

/// 要求当前用户是课程讲师；Admin 直接放行
pub(crate) async fn require_course_instructor(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    course_id: i64,
) -> Result<(), HttpResponse> {
    if current_user.role == UserRole::Admin {
        return Ok(());
    }

    match enrollment_of(storage, course_id, current_user.id).await? {
        Some(enrollment) if enrollment.role == CourseRole::Instructor => Ok(()),
        Some(_) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "需要课程讲师权限",
        ))),
        None => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "您未加入该课程",
        ))),
    }
}

/// 要求目标学生持有课程访问授权，返回其授权记录
pub(crate) async fn require_student_enrollment(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    student_id: i64,
) -> Result<Enrollment, HttpResponse> {
    match enrollment_of(storage, course_id, student_id).await? {
        Some(enrollment) => Ok(enrollment),
        None => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "该学生未加入课程",
        ))),
    }
}

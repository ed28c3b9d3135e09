use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::entities::{Course, Enrollment},
    lessons::entities::Lesson,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{SubmissionListQuery, UpsertSubmissionRequest},
        responses::SubmissionListResponse,
    },
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户查询方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 课程/课时查询方法（课程数据由协作方课程服务维护，这里只读）
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 获取用户在课程中的授权记录
    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>>;
    // 通过ID获取课时信息
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 列出课程的全部课时，按 position 排序
    async fn list_course_lessons(&self, course_id: i64) -> Result<Vec<Lesson>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 更新作业信息
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 列出作业（分页，可按课时/课程筛选）
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 列出多个课时下的全部作业，按创建时间排序
    async fn list_assignments_for_lessons(&self, lesson_ids: Vec<i64>) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 写入/覆盖提交，原子清空既有评分字段
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: UpsertSubmissionRequest,
    ) -> Result<Submission>;
    // 获取学生某作业的当前提交
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出某作业的提交（讲师视角，待评分在前）
    async fn list_submissions_with_pagination(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 批量获取学生在一组作业下的提交
    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: Vec<i64>,
    ) -> Result<Vec<Submission>>;
    // 在版本戳前提下写入评分；版本不匹配返回 None
    async fn apply_grade(
        &self,
        submission_id: i64,
        expected_version: i32,
        score: i32,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 通知管理方法
    // 创建通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // 通过ID获取通知
    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>>;
    // 列出用户通知（分页）
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // 获取用户未读通知数量
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    // 标记通知为已读（幂等）
    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool>;
    // 标记用户所有通知为已读（幂等），返回本次标记数量
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

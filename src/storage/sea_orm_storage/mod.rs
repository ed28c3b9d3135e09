//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod notifications;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 课程/课时模块
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, user_id).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_course_lessons(&self, course_id: i64) -> Result<Vec<Lesson>> {
        self.list_course_lessons_impl(course_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_assignments_for_lessons(&self, lesson_ids: Vec<i64>) -> Result<Vec<Assignment>> {
        self.list_assignments_for_lessons_impl(lesson_ids).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: UpsertSubmissionRequest,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, req)
            .await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(assignment_id, query)
            .await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: Vec<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id, assignment_ids)
            .await
    }

    async fn apply_grade(
        &self,
        submission_id: i64,
        expected_version: i32,
        score: i32,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.apply_grade_impl(submission_id, expected_version, score, feedback, graded_by)
            .await
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(notification_id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }
}

use crate::models::common::pagination::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub lesson_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub max_score: i32,
}

/// 更新作业请求（部分更新）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>, // ISO 8601 格式
    pub max_score: Option<i32>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub lesson_id: Option<i64>,
    pub course_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub lesson_id: Option<i64>,
    pub course_id: Option<i64>,
}

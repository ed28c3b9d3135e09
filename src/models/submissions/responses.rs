use serde::Serialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::models::common::pagination::PaginationInfo;

/// 提交者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionStudent {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
}

/// 提交关联的作业信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionAssignmentInfo {
    pub id: i64,
    pub title: String,
    pub max_score: i32,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 提交中的评分信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionGradeInfo {
    pub score: i32,
    pub feedback: Option<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

/// 提交详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student: SubmissionStudent,
    pub text_answer: Option<String>,
    pub attachment_url: Option<String>,
    pub status: SubmissionStatus,
    pub late: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<SubmissionGradeInfo>,
    pub assignment: Option<SubmissionAssignmentInfo>,
}

/// 提交列表项（讲师批改视角）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub assignment_id: i64,
    pub student: SubmissionStudent,
    pub text_answer: Option<String>,
    pub attachment_url: Option<String>,
    pub status: SubmissionStatus,
    pub late: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<SubmissionGradeInfo>,
}

/// 提交列表响应（待评分在前，其后按提交时间倒序）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

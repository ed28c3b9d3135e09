use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::SubmissionStatus;

/// 时间线中单个作业的状态条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timeline.ts")]
pub struct AssignmentStatusEntry {
    pub assignment_id: i64,
    pub title: String,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_score: i32,
    pub status: SubmissionStatus,
    pub late: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// 按课时分组的时间线段
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timeline.ts")]
pub struct LessonSection {
    pub lesson_id: i64,
    pub lesson_name: String,
    pub position: i32,
    pub assignments: Vec<AssignmentStatusEntry>,
}

/// 学生课程时间线响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timeline.ts")]
pub struct TimelineResponse {
    pub course_id: i64,
    pub student_id: i64,
    pub sections: Vec<LessonSection>,
}

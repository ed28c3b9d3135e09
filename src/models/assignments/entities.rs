use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属课时 ID
    pub lesson_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 截止时间，单一绝对时刻；无截止时间则永不迟交
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    // 满分，整数且 >= 1
    pub max_score: i32,
    // 创建者（讲师）ID
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

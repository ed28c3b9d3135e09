use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 提交/重交作业请求
///
/// text_answer 和 attachment_url 至少填一项才能受理。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UpsertSubmissionRequest {
    pub text_answer: Option<String>,
    pub attachment_url: Option<String>,
}

/// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: i32,
    pub feedback: Option<String>,
}

/// 提交列表查询参数（讲师视角，HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 筛选是否已评分：true=已评分，false=待评分，None=全部
    pub graded: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub graded: Option<bool>,
}

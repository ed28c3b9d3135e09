use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::common::pagination::PaginationInfo;

/// 作业列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

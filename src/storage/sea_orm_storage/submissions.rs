//! 提交存储操作
//!
//! 每个 (assignment_id, student_id) 只有一条当前提交。重交与评分都是
//! 带版本戳前提的单条 UPDATE：重交在同一条语句里覆盖内容并清空评分，
//! 不存在"内容已换、评分还在"的中间态；版本竞争时重交重试、评分返回冲突。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::{SubmissionListQuery, UpsertSubmissionRequest},
        responses::{
            SubmissionGradeInfo, SubmissionListItem, SubmissionListResponse, SubmissionStudent,
        },
    },
};
use crate::services::submissions::lateness::is_late;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

// 版本竞争时的重试上限；触顶说明同一提交被持续并发改写
const UPSERT_MAX_RETRIES: usize = 3;

impl SeaOrmStorage {
    /// 写入/覆盖提交
    ///
    /// 首交走 INSERT；重交是一条以版本戳为前提的 UPDATE，内容覆盖与
    /// 评分清空原子完成。竞争失败（唯一索引冲突或版本不匹配）时重试，
    /// 后到的写入按服务端到达顺序胜出。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: UpsertSubmissionRequest,
    ) -> Result<Submission> {
        for _ in 0..UPSERT_MAX_RETRIES {
            let now = chrono::Utc::now().timestamp();

            let existing = Submissions::find()
                .filter(Column::AssignmentId.eq(assignment_id))
                .filter(Column::StudentId.eq(student_id))
                .one(&self.db)
                .await
                .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

            match existing {
                None => {
                    let model = ActiveModel {
                        assignment_id: Set(assignment_id),
                        student_id: Set(student_id),
                        text_answer: Set(req.text_answer.clone()),
                        attachment_url: Set(req.attachment_url.clone()),
                        submitted_at: Set(now),
                        score: Set(None),
                        feedback: Set(None),
                        graded_at: Set(None),
                        graded_by: Set(None),
                        version: Set(1),
                        ..Default::default()
                    };

                    match model.insert(&self.db).await {
                        Ok(result) => return Ok(result.into_submission()),
                        // 并发首交撞上唯一索引，改走更新路径
                        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                            continue;
                        }
                        Err(e) => {
                            return Err(CourseHubError::database_operation(format!(
                                "创建提交失败: {e}"
                            )));
                        }
                    }
                }
                Some(row) => {
                    let result = Submissions::update_many()
                        .col_expr(Column::TextAnswer, Expr::value(req.text_answer.clone()))
                        .col_expr(
                            Column::AttachmentUrl,
                            Expr::value(req.attachment_url.clone()),
                        )
                        .col_expr(Column::SubmittedAt, Expr::value(now))
                        .col_expr(Column::Score, Expr::value(Option::<i32>::None))
                        .col_expr(Column::Feedback, Expr::value(Option::<String>::None))
                        .col_expr(Column::GradedAt, Expr::value(Option::<i64>::None))
                        .col_expr(Column::GradedBy, Expr::value(Option::<i64>::None))
                        .col_expr(Column::Version, Expr::value(row.version + 1))
                        .filter(Column::Id.eq(row.id))
                        .filter(Column::Version.eq(row.version))
                        .exec(&self.db)
                        .await
                        .map_err(|e| {
                            CourseHubError::database_operation(format!("覆盖提交失败: {e}"))
                        })?;

                    if result.rows_affected > 0 {
                        let updated = Submissions::find_by_id(row.id)
                            .one(&self.db)
                            .await
                            .map_err(|e| {
                                CourseHubError::database_operation(format!("查询提交失败: {e}"))
                            })?
                            .ok_or_else(|| {
                                CourseHubError::not_found(format!("提交不存在: {}", row.id))
                            })?;
                        return Ok(updated.into_submission());
                    }
                    // 版本竞争，重读后重试
                }
            }
        }

        Err(CourseHubError::conflict(format!(
            "提交持续竞争，放弃写入: assignment={assignment_id}, student={student_id}"
        )))
    }

    /// 获取学生某作业的当前提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的提交（分页，讲师批改视角）
    ///
    /// 排序：待评分在前，其后按提交时间倒序。
    pub async fn list_submissions_with_pagination_impl(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = std::cmp::Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        // 作业必须存在，截止时间用于计算迟交标记
        let assignment = self
            .get_assignment_by_id_impl(assignment_id)
            .await?
            .ok_or_else(|| CourseHubError::not_found(format!("作业不存在: {assignment_id}")))?;

        let mut select = Submissions::find().filter(Column::AssignmentId.eq(assignment_id));

        // 评分状态筛选
        match query.graded {
            Some(true) => select = select.filter(Column::Score.is_not_null()),
            Some(false) => select = select.filter(Column::Score.is_null()),
            None => {}
        }

        // 排序：未评分在前，其后按提交时间倒序
        select = select
            .order_by(Expr::col(Column::Score).is_not_null(), Order::Asc)
            .order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询学生信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户信息失败: {e}")))?;

        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        // 组装 SubmissionListItem
        let items = submissions
            .into_iter()
            .map(|m| {
                let student = user_map.get(&m.student_id);
                let sub = m.into_submission();
                SubmissionListItem {
                    id: sub.id,
                    assignment_id: sub.assignment_id,
                    student: SubmissionStudent {
                        id: student.map(|u| u.id).unwrap_or(sub.student_id),
                        username: student
                            .map(|u| u.username.clone())
                            .unwrap_or_else(|| "未知用户".to_string()),
                        display_name: student.and_then(|u| u.display_name.clone()),
                    },
                    text_answer: sub.text_answer.clone(),
                    attachment_url: sub.attachment_url.clone(),
                    status: sub.status(),
                    late: is_late(sub.submitted_at, assignment.due_at),
                    submitted_at: sub.submitted_at,
                    grade: sub.score.map(|score| SubmissionGradeInfo {
                        score,
                        feedback: sub.feedback.clone(),
                        graded_at: sub.graded_at.unwrap_or_default(),
                    }),
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批量获取学生在一组作业下的提交
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
        assignment_ids: Vec<i64>,
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 在版本戳前提下写入评分
    ///
    /// 版本不匹配说明评分读取之后提交被改写过（通常是并发重交），
    /// 返回 None 交由上层报告冲突；绝不把评分附到没看过的内容上。
    pub async fn apply_grade_impl(
        &self,
        submission_id: i64,
        expected_version: i32,
        score: i32,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(Column::Score, Expr::value(Some(score)))
            .col_expr(Column::Feedback, Expr::value(feedback))
            .col_expr(Column::GradedAt, Expr::value(Some(now)))
            .col_expr(Column::GradedBy, Expr::value(Some(graded_by)))
            .col_expr(Column::Version, Expr::value(expected_version + 1))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("写入评分失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| CourseHubError::not_found(format!("提交不存在: {submission_id}")))?;

        Ok(Some(updated.into_submission()))
    }
}

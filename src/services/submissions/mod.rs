pub mod detail;
pub mod grade;
pub mod lateness;
pub mod list;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    GradeSubmissionRequest, SubmissionListQuery, UpsertSubmissionRequest,
};
use crate::models::submissions::responses::{
    SubmissionAssignmentInfo, SubmissionGradeInfo, SubmissionResponse, SubmissionStudent,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 提交/重交作业
    pub async fn upsert_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student: User,
        req: UpsertSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_submission(self, request, assignment_id, student, req).await
    }

    /// 获取我的提交
    pub async fn get_my_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_my_submission(self, request, assignment_id, student_id).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出作业提交（讲师批改视角）
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, assignment_id, query).await
    }

    /// 为提交评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, req).await
    }
}

/// 组装提交详情响应
pub(crate) fn build_submission_response(
    submission: &Submission,
    assignment: &Assignment,
    student: &User,
) -> SubmissionResponse {
    SubmissionResponse {
        id: submission.id,
        assignment_id: submission.assignment_id,
        student: SubmissionStudent {
            id: student.id,
            username: student.username.clone(),
            display_name: student.display_name.clone(),
        },
        text_answer: submission.text_answer.clone(),
        attachment_url: submission.attachment_url.clone(),
        status: submission.status(),
        late: lateness::is_late(submission.submitted_at, assignment.due_at),
        submitted_at: submission.submitted_at,
        grade: submission.score.map(|score| SubmissionGradeInfo {
            score,
            feedback: submission.feedback.clone(),
            graded_at: submission.graded_at.unwrap_or_default(),
        }),
        assignment: Some(SubmissionAssignmentInfo {
            id: assignment.id,
            title: assignment.title.clone(),
            max_score: assignment.max_score,
            due_at: assignment.due_at,
        }),
    }
}

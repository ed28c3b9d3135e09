//! 学生课程时间线聚合
//!
//! 课时 → 作业 → 本人提交的只读联接，输出按课时分组的状态列表。
//! 组装是纯函数，方便单独测试；数据源已按序返回，这里仍然防御性排序。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::middlewares::RequireAuth;
use crate::models::assignments::entities::Assignment;
use crate::models::lessons::entities::Lesson;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::timeline::responses::{AssignmentStatusEntry, LessonSection, TimelineResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;
use crate::services::submissions::lateness::is_late;
use crate::storage::Storage;

pub struct TimelineService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimelineService {
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

    /// 获取学生课程时间线
    /// GET /courses/{course_id}/timeline 与 /courses/{course_id}/timeline/{student_id}
    pub async fn get_student_timeline(
        &self,
        request: &HttpRequest,
        course_id: i64,
        student_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let current_user = match RequireAuth::extract_user(request) {
            Some(user) => user,
            None => {
                return Ok(HttpResponse::Unauthorized()
                    .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
            }
        };

        // 课程必须存在
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "课程不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                );
            }
        }

        let target_student_id = student_id.unwrap_or(current_user.id);

        // 查看他人时间线需要讲师权限
        if target_student_id != current_user.id
            && let Err(resp) =
                access::require_course_instructor(&storage, &current_user, course_id).await
        {
            return Ok(resp);
        }

        // 目标学生必须持有课程访问授权（Admin 查看自己时也不例外）
        if !(target_student_id == current_user.id && current_user.role == UserRole::Admin) {
            if let Err(resp) =
                access::require_student_enrollment(&storage, course_id, target_student_id).await
            {
                return Ok(resp);
            }
        }

        // 课时 → 作业 → 本人提交
        let lessons = match storage.list_course_lessons(course_id).await {
            Ok(lessons) => lessons,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课时失败: {e}"),
                    )),
                );
            }
        };

        let lesson_ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();
        let assignments = match storage.list_assignments_for_lessons(lesson_ids).await {
            Ok(assignments) => assignments,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询作业失败: {e}"),
                    )),
                );
            }
        };

        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = match storage
            .list_student_submissions(target_student_id, assignment_ids)
            .await
        {
            Ok(submissions) => submissions,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询提交失败: {e}"),
                    )),
                );
            }
        };

        let sections = assemble_sections(lessons, assignments, submissions);

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            TimelineResponse {
                course_id,
                student_id: target_student_id,
                sections,
            },
            "查询成功",
        )))
    }
}

/// 组装时间线段：按课时分组，每个作业标注状态与迟交标记
///
/// 纯函数；上游保证有序，但这里仍对课时与作业防御性排序。
pub fn assemble_sections(
    mut lessons: Vec<Lesson>,
    mut assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
) -> Vec<LessonSection> {
    lessons.sort_by_key(|l| (l.position, l.id));
    assignments.sort_by_key(|a| (a.created_at, a.id));

    let submission_map: HashMap<i64, Submission> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    let mut assignments_by_lesson: HashMap<i64, Vec<Assignment>> = HashMap::new();
    for assignment in assignments {
        assignments_by_lesson
            .entry(assignment.lesson_id)
            .or_default()
            .push(assignment);
    }

    lessons
        .into_iter()
        .map(|lesson| {
            let entries = assignments_by_lesson
                .remove(&lesson.id)
                .unwrap_or_default()
                .into_iter()
                .map(|assignment| {
                    let submission = submission_map.get(&assignment.id);
                    match submission {
                        None => AssignmentStatusEntry {
                            assignment_id: assignment.id,
                            title: assignment.title,
                            due_at: assignment.due_at,
                            max_score: assignment.max_score,
                            status: SubmissionStatus::NotSubmitted,
                            late: false,
                            submitted_at: None,
                            score: None,
                            feedback: None,
                        },
                        Some(sub) => AssignmentStatusEntry {
                            assignment_id: assignment.id,
                            title: assignment.title,
                            due_at: assignment.due_at,
                            max_score: assignment.max_score,
                            status: sub.status(),
                            late: is_late(sub.submitted_at, assignment.due_at),
                            submitted_at: Some(sub.submitted_at),
                            score: sub.score,
                            feedback: sub.feedback.clone(),
                        },
                    }
                })
                .collect();

            LessonSection {
                lesson_id: lesson.id,
                lesson_name: lesson.name,
                position: lesson.position,
                assignments: entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().expect("invalid test timestamp")
    }

    fn lesson(id: i64, position: i32, name: &str) -> Lesson {
        Lesson {
            id,
            course_id: 1,
            name: name.to_string(),
            position,
            created_at: ts("2025-01-01T00:00:00Z"),
        }
    }

    fn assignment(id: i64, lesson_id: i64, created_at: &str) -> Assignment {
        Assignment {
            id,
            lesson_id,
            title: format!("assignment-{id}"),
            description: None,
            due_at: Some(ts("2025-01-10T00:00:00Z")),
            max_score: 100,
            created_by: 7,
            created_at: ts(created_at),
            updated_at: ts(created_at),
        }
    }

    fn submission(assignment_id: i64, submitted_at: &str, score: Option<i32>) -> Submission {
        Submission {
            id: assignment_id * 10,
            assignment_id,
            student_id: 42,
            text_answer: Some("answer".to_string()),
            attachment_url: None,
            submitted_at: ts(submitted_at),
            score,
            feedback: score.map(|_| "不错".to_string()),
            graded_at: score.map(|_| ts("2025-01-11T00:00:00Z")),
            graded_by: score.map(|_| 7),
            version: 1,
        }
    }

    #[test]
    fn test_two_lessons_graded_and_not_submitted() {
        // 课时1有已评分作业，课时2有未提交作业
        let lessons = vec![lesson(1, 1, "第一课"), lesson(2, 2, "第二课")];
        let assignments = vec![
            assignment(11, 1, "2025-01-02T00:00:00Z"),
            assignment(21, 2, "2025-01-03T00:00:00Z"),
        ];
        let submissions = vec![submission(11, "2025-01-09T00:00:00Z", Some(85))];

        let sections = assemble_sections(lessons, assignments, submissions);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].lesson_id, 1);
        assert_eq!(sections[0].assignments.len(), 1);
        assert_eq!(sections[0].assignments[0].status, SubmissionStatus::Graded);
        assert_eq!(sections[0].assignments[0].score, Some(85));
        assert_eq!(sections[1].lesson_id, 2);
        assert_eq!(
            sections[1].assignments[0].status,
            SubmissionStatus::NotSubmitted
        );
        assert_eq!(sections[1].assignments[0].score, None);
        assert!(!sections[1].assignments[0].late);
    }

    #[test]
    fn test_tolerates_unsorted_input() {
        // 上游乱序时仍按课时位置与作业创建顺序输出
        let lessons = vec![lesson(2, 5, "后面的课"), lesson(1, 1, "前面的课")];
        let assignments = vec![
            assignment(13, 1, "2025-01-04T00:00:00Z"),
            assignment(11, 1, "2025-01-02T00:00:00Z"),
            assignment(12, 1, "2025-01-03T00:00:00Z"),
        ];

        let sections = assemble_sections(lessons, assignments, vec![]);

        assert_eq!(sections[0].lesson_id, 1);
        assert_eq!(sections[1].lesson_id, 2);
        let ids: Vec<i64> = sections[0]
            .assignments
            .iter()
            .map(|a| a.assignment_id)
            .collect();
        assert_eq!(ids, vec![11, 12, 13]);
    }

    #[test]
    fn test_late_flag() {
        let lessons = vec![lesson(1, 1, "第一课")];
        let assignments = vec![assignment(11, 1, "2025-01-02T00:00:00Z")];
        // 截止时间 2025-01-10T00:00:00Z，晚一秒提交
        let submissions = vec![submission(11, "2025-01-10T00:00:01Z", None)];

        let sections = assemble_sections(lessons, assignments, submissions);

        assert_eq!(
            sections[0].assignments[0].status,
            SubmissionStatus::Submitted
        );
        assert!(sections[0].assignments[0].late);
    }

    #[test]
    fn test_submitted_on_time_with_feedback() {
        let lessons = vec![lesson(1, 1, "第一课")];
        let assignments = vec![assignment(11, 1, "2025-01-02T00:00:00Z")];
        let submissions = vec![submission(11, "2025-01-09T23:59:00Z", Some(90))];

        let sections = assemble_sections(lessons, assignments, submissions);

        let entry = &sections[0].assignments[0];
        assert_eq!(entry.status, SubmissionStatus::Graded);
        assert!(!entry.late);
        assert_eq!(entry.feedback.as_deref(), Some("不错"));
        assert_eq!(entry.submitted_at, Some(ts("2025-01-09T23:59:00Z")));
    }

    #[test]
    fn test_empty_course() {
        let sections = assemble_sections(vec![], vec![], vec![]);
        assert!(sections.is_empty());
    }
}

//! 提交实体
//!
//! 每个 (assignment_id, student_id) 唯一一行；评分字段内联，
//! 重交时与内容在同一条 UPDATE 中原子清空。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_answer: Option<String>,
    #[sea_orm(nullable)]
    pub attachment_url: Option<String>,
    pub submitted_at: i64,
    pub score: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub graded_at: Option<i64>,
    pub graded_by: Option<i64>,
    // 乐观并发戳
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            text_answer: self.text_answer,
            attachment_url: self.attachment_url,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
            score: self.score,
            feedback: self.feedback,
            graded_at: self
                .graded_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            graded_by: self.graded_by,
            version: self.version,
        }
    }
}

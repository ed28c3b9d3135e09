//! 选课关联实体（课程访问授权）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_enrollment(self) -> crate::models::courses::entities::Enrollment {
        use crate::models::courses::entities::{CourseRole, Enrollment};
        use chrono::{DateTime, Utc};

        Enrollment {
            id: self.id,
            course_id: self.course_id,
            user_id: self.user_id,
            role: self
                .role
                .parse::<CourseRole>()
                .unwrap_or(CourseRole::Student),
            joined_at: DateTime::<Utc>::from_timestamp(self.joined_at, 0).unwrap_or_default(),
        }
    }
}

//! 通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_id: i64,
    pub topic: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub data_json: Option<String>,
    #[sea_orm(nullable)]
    pub link_url: Option<String>,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecipientId",
        to = "super::users::Column::Id"
    )]
    Recipient,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::notifications::entities::{Notification, NotificationTopic};
        use chrono::{DateTime, Utc};

        Notification {
            id: self.id,
            recipient_id: self.recipient_id,
            topic: self
                .topic
                .parse::<NotificationTopic>()
                .unwrap_or(NotificationTopic::AssignmentGraded),
            title: self.title,
            message: self.message,
            data: self
                .data_json
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
            link_url: self.link_url,
            is_read: self.is_read,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知主题
//
// assignment_graded 由本服务的评分引擎触发；course_* 三类属于协作方
// 课程审核流程的线格式，本服务只负责投递与展示。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationTopic {
    AssignmentGraded,
    InstructorCourseApproved,
    InstructorCourseRejected,
    AdminCourseSubmitted,
}

impl NotificationTopic {
    pub const ASSIGNMENT_GRADED: &'static str = "ASSIGNMENT_GRADED";
    pub const INSTRUCTOR_COURSE_APPROVED: &'static str = "INSTRUCTOR_COURSE_APPROVED";
    pub const INSTRUCTOR_COURSE_REJECTED: &'static str = "INSTRUCTOR_COURSE_REJECTED";
    pub const ADMIN_COURSE_SUBMITTED: &'static str = "ADMIN_COURSE_SUBMITTED";
}

impl<'de> Deserialize<'de> for NotificationTopic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("无效的通知主题: '{s}'")))
    }
}

impl std::fmt::Display for NotificationTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationTopic::AssignmentGraded => NotificationTopic::ASSIGNMENT_GRADED,
            NotificationTopic::InstructorCourseApproved => {
                NotificationTopic::INSTRUCTOR_COURSE_APPROVED
            }
            NotificationTopic::InstructorCourseRejected => {
                NotificationTopic::INSTRUCTOR_COURSE_REJECTED
            }
            NotificationTopic::AdminCourseSubmitted => NotificationTopic::ADMIN_COURSE_SUBMITTED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for NotificationTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            NotificationTopic::ASSIGNMENT_GRADED => Ok(NotificationTopic::AssignmentGraded),
            NotificationTopic::INSTRUCTOR_COURSE_APPROVED => {
                Ok(NotificationTopic::InstructorCourseApproved)
            }
            NotificationTopic::INSTRUCTOR_COURSE_REJECTED => {
                Ok(NotificationTopic::InstructorCourseRejected)
            }
            NotificationTopic::ADMIN_COURSE_SUBMITTED => Ok(NotificationTopic::AdminCourseSubmitted),
            _ => Err(format!("Invalid notification topic: {s}")),
        }
    }
}

// 通知实体
//
// 创建后只有已读标记会变化；正常运行中从不删除。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub topic: NotificationTopic,
    pub title: String,
    pub message: String,
    // 不透明结构化载荷，如 {"course_id": 1}
    pub data: Option<serde_json::Value>,
    // 兜底深链
    pub link_url: Option<String>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_parse() {
        assert_eq!(
            "ASSIGNMENT_GRADED".parse::<NotificationTopic>(),
            Ok(NotificationTopic::AssignmentGraded)
        );
        assert!("assignment_graded".parse::<NotificationTopic>().is_err());
        assert_eq!(
            NotificationTopic::AdminCourseSubmitted.to_string(),
            "ADMIN_COURSE_SUBMITTED"
        );
    }
}

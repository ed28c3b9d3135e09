use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程内角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseRole {
    Student,    // 学生
    Instructor, // 讲师
}

impl<'de> Deserialize<'de> for CourseRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "student" => Ok(CourseRole::Student),
            "instructor" => Ok(CourseRole::Instructor),
            _ => Err(serde::de::Error::custom(format!(
                "无效的课程角色: '{s}'. 支持的角色: student, instructor"
            ))),
        }
    }
}

impl std::fmt::Display for CourseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRole::Student => write!(f, "student"),
            CourseRole::Instructor => write!(f, "instructor"),
        }
    }
}

impl std::str::FromStr for CourseRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(CourseRole::Student),
            "instructor" => Ok(CourseRole::Instructor),
            _ => Err(format!("Invalid course role: {s}")),
        }
    }
}

// 课程实体（由协作方课程服务维护，本服务只读）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选课记录，即课程访问授权
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: CourseRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

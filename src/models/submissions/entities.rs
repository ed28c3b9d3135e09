use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态，派生值，不落库
//
// NOT_SUBMITTED 表示不存在提交行，仅在时间线等聚合视图中出现；
// 有行无分数为 SUBMITTED，有分数为 GRADED。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    NotSubmitted,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub const NOT_SUBMITTED: &'static str = "NOT_SUBMITTED";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const GRADED: &'static str = "GRADED";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::NOT_SUBMITTED => Ok(SubmissionStatus::NotSubmitted),
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: NOT_SUBMITTED, SUBMITTED, GRADED"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::NotSubmitted => write!(f, "{}", SubmissionStatus::NOT_SUBMITTED),
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_SUBMITTED" => Ok(SubmissionStatus::NotSubmitted),
            "SUBMITTED" => Ok(SubmissionStatus::Submitted),
            "GRADED" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
//
// 每个 (assignment_id, student_id) 只有一条当前提交；重交覆盖内容并清空评分。
// version 为乐观并发戳，每次写入加一。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub text_answer: Option<String>,
    pub attachment_url: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
    #[ts(skip)]
    #[serde(skip_serializing, default)] // 并发戳只在服务内部流转
    pub version: i32,
}

impl Submission {
    /// 派生提交状态：有分数即已评分，否则已提交
    pub fn status(&self) -> SubmissionStatus {
        if self.score.is_some() {
            SubmissionStatus::Graded
        } else {
            SubmissionStatus::Submitted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(score: Option<i32>) -> Submission {
        Submission {
            id: 1,
            assignment_id: 10,
            student_id: 100,
            text_answer: Some("answer".to_string()),
            attachment_url: None,
            submitted_at: chrono::Utc::now(),
            score,
            feedback: None,
            graded_at: None,
            graded_by: None,
            version: 1,
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(submission(None).status(), SubmissionStatus::Submitted);
        assert_eq!(submission(Some(85)).status(), SubmissionStatus::Graded);
        // 0 分也是有效评分
        assert_eq!(submission(Some(0)).status(), SubmissionStatus::Graded);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(
            SubmissionStatus::NotSubmitted.to_string(),
            "NOT_SUBMITTED"
        );
        assert_eq!(SubmissionStatus::Submitted.to_string(), "SUBMITTED");
        assert_eq!(SubmissionStatus::Graded.to_string(), "GRADED");
        assert_eq!(
            "GRADED".parse::<SubmissionStatus>(),
            Ok(SubmissionStatus::Graded)
        );
        assert!("graded".parse::<SubmissionStatus>().is_err());
    }
}

//! 迟交判定
//!
//! 纯函数，客户端和服务端用同一条规则；服务端结果为准。

use chrono::{DateTime, Utc};

/// 判断提交是否迟交
///
/// 无截止时间永不迟交；严格晚于截止时刻才算迟交，恰好相等不算。
pub fn is_late(submitted_at: DateTime<Utc>, due_at: Option<DateTime<Utc>>) -> bool {
    match due_at {
        Some(due) => submitted_at > due,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().expect("invalid test timestamp")
    }

    #[test]
    fn test_no_deadline_never_late() {
        assert!(!is_late(ts("2025-01-09T23:59:00Z"), None));
        assert!(!is_late(ts("2099-12-31T23:59:59Z"), None));
        assert!(!is_late(Utc.timestamp_opt(0, 0).unwrap(), None));
    }

    #[test]
    fn test_before_deadline_not_late() {
        let due = ts("2025-01-10T00:00:00Z");
        assert!(!is_late(ts("2025-01-09T23:59:00Z"), Some(due)));
        assert!(!is_late(ts("2024-12-01T00:00:00Z"), Some(due)));
    }

    #[test]
    fn test_boundary_equal_not_late() {
        let due = ts("2025-01-10T00:00:00Z");
        assert!(!is_late(due, Some(due)));
    }

    #[test]
    fn test_after_deadline_late() {
        let due = ts("2025-01-10T00:00:00Z");
        assert!(is_late(ts("2025-01-10T00:00:01Z"), Some(due)));
        assert!(is_late(ts("2025-02-01T12:00:00Z"), Some(due)));
    }
}

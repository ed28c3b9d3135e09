//! 输入校验工具

use once_cell::sync::Lazy;
use regex::Regex;

// 附件 URL 只接受 http/https，限制长度防止滥用
static ATTACHMENT_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s]+$").expect("invalid attachment url regex"));

const MAX_ATTACHMENT_URL_LEN: usize = 2048;
const MAX_TITLE_LEN: usize = 256;

/// 校验作业标题：非空白且长度受限
pub fn validate_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.len() <= MAX_TITLE_LEN
}

/// 校验附件 URL 形态
///
/// 只做形态检查，不访问也不验证指向的内容。
pub fn validate_attachment_url(url: &str) -> bool {
    url.len() <= MAX_ATTACHMENT_URL_LEN && ATTACHMENT_URL_RE.is_match(url)
}

/// 判断可选字符串是否为空内容（None 或全空白）
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("第一次作业"));
        assert!(validate_title("  Lab 1  "));
        assert!(!validate_title(""));
        assert!(!validate_title("   "));
        assert!(!validate_title(&"x".repeat(300)));
    }

    #[test]
    fn test_validate_attachment_url() {
        assert!(validate_attachment_url("https://files.example.com/a/b.pdf"));
        assert!(validate_attachment_url("http://cdn.local/report.docx"));
        assert!(!validate_attachment_url("ftp://files.example.com/a.pdf"));
        assert!(!validate_attachment_url("not a url"));
        assert!(!validate_attachment_url(&format!(
            "https://e.com/{}",
            "x".repeat(2048)
        )));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("".to_string())));
        assert!(is_blank(&Some("   ".to_string())));
        assert!(!is_blank(&Some("answer".to_string())));
    }
}

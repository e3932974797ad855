//! Mention 渲染与注入
//!
//! - `here` / `channel` / 含 `subteam^` 的目标渲染为 `<!target>`
//! - 其它目标渲染为用户引用 `<@target>`
//! - 触发条件为逗号分隔的状态列表，或 `always`

use super::status::JobStatus;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

/// 触发条件为空时的默认值
pub const ALWAYS: &str = "always";

const BROADCAST_TARGETS: [&str; 2] = ["here", "channel"];
const SUBTEAM_MARKER: &str = "subteam^";

/// 消息以 "*Title*\n" 开头时视为伪标题
fn fake_headline() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\*\w+\*\n").unwrap())
}

/// 格式化单个 mention 目标
pub fn format_mention(target: &str) -> String {
    if target.contains(SUBTEAM_MARKER) || BROADCAST_TARGETS.contains(&target) {
        format!("<!{}>", target)
    } else {
        format!("<@{}>", target)
    }
}

/// 当前状态是否满足触发条件
pub fn condition_matches(condition: &str, status: &JobStatus) -> bool {
    condition
        .split(',')
        .map(str::trim)
        .any(|c| c == ALWAYS || c == status.as_str())
}

/// 生成 mention 文本；不满足条件或没有目标时返回空字符串
pub fn mention_text(targets: &str, condition: &str, status: &JobStatus) -> String {
    if !condition_matches(condition, status) {
        return String::new();
    }

    let normalized: String = targets.chars().filter(|c| !c.is_whitespace()).collect();
    normalized
        .split(',')
        .filter(|t| !t.is_empty())
        .map(format_mention)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 把 mention 注入到消息文本中
///
/// 状态必须是 success / failure / cancelled 之一，否则返回错误。
/// 消息以伪标题开头时 mention 插在标题之后，否则放在最前面。
pub fn inject_mention(
    message: &str,
    targets: &str,
    condition: &str,
    status: &JobStatus,
) -> Result<String> {
    status.require_terminal()?;

    let mention = mention_text(targets, condition, status);
    if mention.is_empty() {
        return Ok(message.trim().to_string());
    }

    if fake_headline().is_match(message) {
        if let Some(idx) = message.find('\n') {
            let (headline, rest) = message.split_at(idx + 1);
            return Ok(format!("{}{} {}", headline, mention, rest).trim().to_string());
        }
    }

    Ok(format!("{} {}", mention, message).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mention() {
        assert_eq!(format_mention("user_id"), "<@user_id>");
        assert_eq!(format_mention("here"), "<!here>");
        assert_eq!(format_mention("channel"), "<!channel>");
        assert_eq!(format_mention("subteam^g1"), "<!subteam^g1>");
    }

    #[test]
    fn test_mention_text_multiple_targets() {
        let text = mention_text("user_id, user_id2", ALWAYS, &JobStatus::Success);
        assert_eq!(text, "<@user_id> <@user_id2>");

        let text = mention_text("here,subteam^g1, U123", "success", &JobStatus::Success);
        assert_eq!(text, "<!here> <!subteam^g1> <@U123>");
    }

    #[test]
    fn test_mention_text_skips_empty_targets() {
        assert_eq!(mention_text("", ALWAYS, &JobStatus::Success), "");
        assert_eq!(mention_text("a,,b", ALWAYS, &JobStatus::Success), "<@a> <@b>");
    }

    #[test]
    fn test_condition_matches() {
        assert!(condition_matches(ALWAYS, &JobStatus::Cancelled));
        assert!(condition_matches("failure,success", &JobStatus::Success));
        assert!(condition_matches("failure, success", &JobStatus::Success));
        assert!(!condition_matches("failure,success", &JobStatus::Cancelled));
        assert!(!condition_matches("", &JobStatus::Success));
    }

    #[test]
    fn test_always_mentions_every_terminal_status() {
        for status in [JobStatus::Success, JobStatus::Failure, JobStatus::Cancelled] {
            let text = inject_mention("mention test", "here", ALWAYS, &status).unwrap();
            assert_eq!(text, "<!here> mention test");
        }
    }

    #[test]
    fn test_condition_not_met_leaves_text() {
        let text =
            inject_mention("mention test", "here", "failure,success", &JobStatus::Cancelled)
                .unwrap();
        assert_eq!(text, "mention test");
    }

    #[test]
    fn test_invalid_status_is_error() {
        let status = JobStatus::parse("in_progress");
        let err = inject_mention("text", "here", ALWAYS, &status).unwrap_err();
        assert!(err.to_string().contains("invalid status: in_progress"));

        // 即使没有 mention 目标也要校验状态
        assert!(inject_mention("text", "", ALWAYS, &status).is_err());
    }

    #[test]
    fn test_mention_after_fake_headline() {
        let text =
            inject_mention("*Comment*\nLorem ipsum", "here", ALWAYS, &JobStatus::Success).unwrap();
        assert_eq!(text, "*Comment*\n<!here> Lorem ipsum");
    }

    #[test]
    fn test_bold_with_spaces_is_not_headline() {
        let text =
            inject_mention("*Two words*\nbody", "here", ALWAYS, &JobStatus::Success).unwrap();
        assert_eq!(text, "<!here> *Two words*\nbody");
    }

    #[test]
    fn test_mention_only() {
        let text = inject_mention("", "here", ALWAYS, &JobStatus::Success).unwrap();
        assert_eq!(text, "<!here>");
    }
}

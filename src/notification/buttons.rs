//! Button line parsing
//!
//! One button per line, components separated by `|`:
//! - `label|url`
//! - `label|style|url`
//!
//! Only the first three components count; anything after a third `|` is ignored.
//! Lines with fewer than two components or an empty one are dropped without error.

use super::blocks::Button;

/// Parse a single `label|url` or `label|style|url` line
pub fn parse_button(line: &str) -> Option<Button> {
    let parts: Vec<&str> = line.split('|').take(3).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    match parts.as_slice() {
        [label, url] => Some(Button::new(*label, None, *url)),
        [label, style, url] => Some(Button::new(*label, Some(style.to_string()), *url)),
        _ => None,
    }
}

/// Parse every line of the buttons input, keeping only the well-formed ones
pub fn parse_buttons(input: &str) -> Vec<Button> {
    input.lines().filter_map(parse_button).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_button() {
        let buttons = parse_buttons("Download|primary|https://x/file.txt");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label(), "Download");
        assert_eq!(buttons[0].style.as_deref(), Some("primary"));
        assert_eq!(buttons[0].url, "https://x/file.txt");
    }

    #[test]
    fn test_unstyled_button() {
        let buttons = parse_buttons("Install|https://x/file2.txt");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label(), "Install");
        assert!(buttons[0].style.is_none());
        assert_eq!(buttons[0].url, "https://x/file2.txt");
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        assert!(parse_buttons("[Download](url)").is_empty());
        assert!(parse_buttons("").is_empty());
        assert!(parse_buttons("|https://x").is_empty());
        assert!(parse_buttons("Label||https://x").is_empty());
    }

    #[test]
    fn test_extra_components_are_ignored() {
        let buttons = parse_buttons("a|b|c|d");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label(), "a");
        assert_eq!(buttons[0].style.as_deref(), Some("b"));
        assert_eq!(buttons[0].url, "c");

        let buttons = parse_buttons("Docs|primary|https://x/docs|");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].style.as_deref(), Some("primary"));
        assert_eq!(buttons[0].url, "https://x/docs");
    }

    #[test]
    fn test_multiple_lines() {
        let input = "Download|primary|https://x/file.txt\n[bad](line)\nInstall|https://x/file2.txt\n";
        let buttons = parse_buttons(input);
        let labels: Vec<&str> = buttons.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["Download", "Install"]);
    }

    #[test]
    fn test_crlf_lines() {
        let buttons = parse_buttons("A|https://a\r\nB|danger|https://b");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].url, "https://a");
        assert_eq!(buttons[1].style.as_deref(), Some("danger"));
    }
}

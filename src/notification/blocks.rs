//! Slack Block Kit 数据结构
//!
//! 只覆盖本工具会生成的 block 类型：header / section / actions / divider / context。
//! 用户自定义的 block 不经过这里，直接以 JSON 原样透传。

use serde::{Deserialize, Serialize};

/// GitHub logo（footer 中的图标）
pub const GITHUB_LOGO_URL: &str = "https://github.githubassets.com/apple-touch-icon.png";

/// 文本对象
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::PlainText { text, .. } | TextObject::Mrkdwn { text } => text,
        }
    }
}

/// 按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: TextObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub url: String,
}

impl Button {
    pub fn new(label: impl Into<String>, style: Option<String>, url: impl Into<String>) -> Self {
        Self {
            text: TextObject::plain(label),
            style,
            url: url.into(),
        }
    }

    pub fn label(&self) -> &str {
        self.text.text()
    }
}

/// actions block 中的交互元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    Button(Button),
}

/// context block 中的元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    Image { image_url: String, alt_text: String },
    Mrkdwn { text: String },
}

/// 消息段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<TextObject>>,
    },
    Actions {
        elements: Vec<ActionElement>,
    },
    Divider,
    Context {
        elements: Vec<ContextElement>,
    },
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: TextObject::plain(text),
        }
    }

    pub fn mrkdwn_section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::mrkdwn(text)),
            fields: None,
        }
    }

    pub fn fields_section(fields: Vec<TextObject>) -> Self {
        Block::Section {
            text: None,
            fields: Some(fields),
        }
    }

    pub fn actions(buttons: Vec<Button>) -> Self {
        Block::Actions {
            elements: buttons.into_iter().map(ActionElement::Button).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_serializes_as_plain_text_with_emoji() {
        let value = serde_json::to_value(Block::header("Release")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "header",
                "text": {"type": "plain_text", "text": "Release", "emoji": true}
            })
        );
    }

    #[test]
    fn test_section_omits_missing_parts() {
        let value = serde_json::to_value(Block::mrkdwn_section("hi")).unwrap();
        assert_eq!(
            value,
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "hi"}})
        );

        let value =
            serde_json::to_value(Block::fields_section(vec![TextObject::mrkdwn("*A*\nb")])).unwrap();
        assert_eq!(
            value,
            json!({"type": "section", "fields": [{"type": "mrkdwn", "text": "*A*\nb"}]})
        );
    }

    #[test]
    fn test_button_style_only_when_present() {
        let block = Block::actions(vec![
            Button::new("Download", Some("primary".to_string()), "https://x/file.txt"),
            Button::new("Install", None, "https://x/file2.txt"),
        ]);
        let value = serde_json::to_value(block).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "actions",
                "elements": [
                    {
                        "type": "button",
                        "text": {"type": "plain_text", "text": "Download", "emoji": true},
                        "style": "primary",
                        "url": "https://x/file.txt"
                    },
                    {
                        "type": "button",
                        "text": {"type": "plain_text", "text": "Install", "emoji": true},
                        "url": "https://x/file2.txt"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_divider_and_context() {
        assert_eq!(
            serde_json::to_value(Block::Divider).unwrap(),
            json!({"type": "divider"})
        );

        let context = Block::Context {
            elements: vec![
                ContextElement::Image {
                    image_url: GITHUB_LOGO_URL.to_string(),
                    alt_text: "GitHub Logo".to_string(),
                },
                ContextElement::Mrkdwn {
                    text: "footer".to_string(),
                },
            ],
        };
        assert_eq!(
            serde_json::to_value(context).unwrap(),
            json!({
                "type": "context",
                "elements": [
                    {"type": "image", "image_url": GITHUB_LOGO_URL, "alt_text": "GitHub Logo"},
                    {"type": "mrkdwn", "text": "footer"}
                ]
            })
        );
    }

    #[test]
    fn test_blocks_deserialize_from_slack_json() {
        let block: Block = serde_json::from_value(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": "hello"}
        }))
        .unwrap();
        assert_eq!(block, Block::mrkdwn_section("hello"));
    }
}

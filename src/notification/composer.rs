//! 消息组装
//!
//! 消息段顺序固定：
//! 1. header（有 header 时）
//! 2. 正文 + mention（有 text 或 mention 且结果非空时）
//! 3. changelog（有 changelog 时）
//! 4. fields（至少一个字段有值时）
//! 5. buttons（至少一个按钮合法时）
//! 6. divider
//! 7. footer：workflow 名称、run 链接、状态图标
//!
//! 提供 `custom_blocks` 时跳过以上全部逻辑，blocks 原样发送。

use super::blocks::{Block, ContextElement, GITHUB_LOGO_URL};
use super::buttons::parse_buttons;
use super::channel::{MessageBlocks, PostMessage};
use super::fields::FieldFactory;
use super::mention::inject_mention;
use super::status::JobStatus;
use crate::config::NotifyConfig;
use crate::github::{ActionContext, GitHubApi};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// 消息组装器
pub struct MessageComposer<'a, G> {
    config: &'a NotifyConfig,
    context: &'a ActionContext,
    github: &'a G,
    now: Option<DateTime<Utc>>,
}

impl<'a, G: GitHubApi> MessageComposer<'a, G> {
    pub fn new(config: &'a NotifyConfig, context: &'a ActionContext, github: &'a G) -> Self {
        Self {
            config,
            context,
            github,
            now: None,
        }
    }

    /// 指定计算 duration 的当前时间
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// 根据配置生成最终消息
    pub async fn build(&self) -> Result<PostMessage> {
        if self.config.uses_custom_blocks() {
            custom_message(self.config)
        } else {
            self.compose_message().await
        }
    }

    /// 组装标准消息
    pub async fn compose_message(&self) -> Result<PostMessage> {
        let config = self.config;
        let status = JobStatus::parse(&config.status);
        let mut blocks = Vec::new();

        if !config.header.is_empty() {
            blocks.push(Block::header(&config.header));
        }

        if !config.text.is_empty() || !config.mention.is_empty() {
            let text = inject_mention(&config.text, &config.mention, &config.if_mention, &status)?;
            if !text.is_empty() {
                blocks.push(Block::mrkdwn_section(text));
            }
        }

        if !config.changelog.is_empty() {
            blocks.push(Block::mrkdwn_section(format!(
                "*Changelog*\n```{}```",
                config.changelog
            )));
        }

        let mut factory = FieldFactory::new(&config.fields, self.context, self.github);
        if let Some(now) = self.now {
            factory = factory.with_now(now);
        }
        let fields = factory.fields().await?;
        if !fields.is_empty() {
            blocks.push(Block::fields_section(
                fields.iter().map(|f| f.render()).collect(),
            ));
        }

        if !config.buttons.is_empty() {
            let buttons = parse_buttons(&config.buttons);
            if !buttons.is_empty() {
                blocks.push(Block::actions(buttons));
            }
        }

        blocks.push(Block::Divider);
        blocks.push(Block::Context {
            elements: vec![
                ContextElement::Image {
                    image_url: GITHUB_LOGO_URL.to_string(),
                    alt_text: "GitHub Logo".to_string(),
                },
                ContextElement::Mrkdwn {
                    text: self.footer_text(&status),
                },
            ],
        });

        debug!(blocks = blocks.len(), "Composed message");
        Ok(PostMessage::new(
            &config.channel,
            &config.text,
            MessageBlocks::Composed(blocks),
        ))
    }

    /// `GitHub Action: {workflow} <run_url|#run_number> {icon}`
    pub fn footer_text(&self, status: &JobStatus) -> String {
        format!(
            "GitHub Action: {} <{}|#{}> {}",
            self.context.workflow,
            self.context.run_url(),
            self.context.run_number,
            status.icon()
        )
    }
}

/// 用户自定义 blocks：payload 为 {channel, text, blocks}
pub fn custom_message(config: &NotifyConfig) -> Result<PostMessage> {
    let value: serde_json::Value = serde_json::from_str(&config.custom_blocks)
        .context("Failed to parse custom_blocks as JSON")?;

    let blocks = match value {
        serde_json::Value::Array(blocks) => blocks,
        other => {
            return Err(anyhow!(
                "custom_blocks must be a JSON array of blocks, got {}",
                json_kind(&other)
            ))
        }
    };

    debug!(blocks = blocks.len(), "Using custom blocks");
    Ok(PostMessage::new(
        &config.channel,
        &config.text,
        MessageBlocks::Custom(blocks),
    ))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

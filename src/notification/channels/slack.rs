//! Slack 渠道
//!
//! 通过 Web API `chat.postMessage` 发送消息（bot token 认证）。

use crate::notification::channel::{NotificationChannel, PostMessage, SendResult};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Slack Web API 地址
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// Slack 渠道配置
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Web API 基础地址
    pub api_url: String,
    /// Bot token (xoxb-...)
    pub token: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_url: SLACK_API_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// chat.postMessage 响应
#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

/// Slack 渠道
#[derive(Debug)]
pub struct SlackChannel {
    client: Client,
    config: SlackConfig,
}

impl SlackChannel {
    pub fn new(config: SlackConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(anyhow!("slack_token is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// 调用 chat.postMessage
    pub async fn post_message(&self, message: &PostMessage) -> Result<PostMessageResponse> {
        let url = format!("{}/chat.postMessage", self.config.api_url.trim_end_matches('/'));
        debug!(url = %url, channel = %message.channel, blocks = message.blocks.len(), "Posting Slack message");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json; charset=utf-8")
            .json(message)
            .send()
            .await
            .context("Slack request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Slack API returned HTTP error");
            return Err(anyhow!("Slack API HTTP {}: {}", status, body));
        }

        let slack_response: PostMessageResponse = response
            .json()
            .await
            .context("Failed to parse Slack response")?;

        if slack_response.ok {
            Ok(slack_response)
        } else {
            let reason = slack_response
                .error
                .unwrap_or_else(|| "unknown_error".to_string());
            error!(error = %reason, "Slack API rejected message");
            Err(anyhow!("An API error occurred: {}", reason))
        }
    }
}

impl NotificationChannel for SlackChannel {
    fn name(&self) -> &str {
        "slack"
    }

    async fn send(&self, message: &PostMessage) -> Result<SendResult> {
        let response = self.post_message(message).await?;
        info!(
            channel = response.channel.as_deref().unwrap_or(&message.channel),
            ts = response.ts.as_deref().unwrap_or(""),
            "Slack message sent"
        );
        Ok(SendResult::Sent { ts: response.ts })
    }
}

// src/cli/notify.rs
//! notify 命令处理
//!
//! 输入既可以通过命令行参数传入，也可以来自 GitHub Actions 注入的 `INPUT_*` 环境变量。

use crate::config::NotifyConfig;
use crate::github::{ActionContext, GitHubClient, GitHubConfig};
use crate::notification::channels::SLACK_API_URL;
use crate::notification::{
    MessageComposer, NotificationChannel, SendResult, SlackChannel, SlackConfig, StdoutChannel,
};
use anyhow::{bail, Result};
use clap::Args;
use tracing::{debug, info};

/// notify 命令参数
#[derive(Args, Debug, Clone, Default)]
pub struct NotifyArgs {
    /// Slack 频道 ID 或名称
    #[arg(long, env = "INPUT_CHANNEL", default_value = "")]
    pub channel: String,
    /// Job 状态: success | failure | cancelled | 其它（视为运行中）
    #[arg(long, env = "INPUT_STATUS", default_value = "")]
    pub status: String,
    /// Mention 目标，逗号分隔（user id / here / channel / subteam^id）
    #[arg(long, env = "INPUT_MENTION", default_value = "")]
    pub mention: String,
    /// Mention 触发条件: always 或逗号分隔的状态列表
    #[arg(long, env = "INPUT_IF_MENTION", default_value = "")]
    pub if_mention: String,
    /// 显示的字段，逗号分隔，或 all
    #[arg(long, env = "INPUT_FIELDS", default_value = "")]
    pub fields: String,
    /// 消息正文（Slack mrkdwn）
    #[arg(long, env = "INPUT_TEXT", default_value = "")]
    pub text: String,
    /// 消息标题
    #[arg(long, env = "INPUT_HEADER", default_value = "")]
    pub header: String,
    /// Changelog 文本
    #[arg(long, env = "INPUT_CHANGELOG", default_value = "")]
    pub changelog: String,
    /// 按钮，每行一个: label|url 或 label|style|url
    #[arg(long, env = "INPUT_BUTTONS", default_value = "")]
    pub buttons: String,
    /// 自定义 blocks（JSON 数组），提供时跳过消息组装
    #[arg(long, env = "INPUT_CUSTOM_BLOCKS", default_value = "")]
    pub custom_blocks: String,
    /// GitHub token
    #[arg(long, env = "INPUT_GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub github_token: String,
    /// Slack bot token
    #[arg(long, env = "INPUT_SLACK_TOKEN", default_value = "", hide_env_values = true)]
    pub slack_token: String,
    /// Slack Web API 地址
    #[arg(long, env = "SLACK_API_URL", default_value = SLACK_API_URL)]
    pub slack_api_url: String,
    /// HTTP 超时（秒）
    #[arg(long, default_value = "30")]
    pub timeout: u64,
    /// 只打印 payload，不发送
    #[arg(long)]
    pub dry_run: bool,
}

impl NotifyArgs {
    /// 转换为规范化后的配置，并校验必填项
    pub fn to_config(&self) -> Result<NotifyConfig> {
        if self.github_token.is_empty() {
            bail!("Input required and not supplied: github_token");
        }
        if self.slack_token.is_empty() && !self.dry_run {
            bail!("Input required and not supplied: slack_token");
        }

        NotifyConfig::new(NotifyConfig {
            channel: self.channel.clone(),
            status: self.status.clone(),
            mention: self.mention.clone(),
            if_mention: self.if_mention.clone(),
            fields: self.fields.clone(),
            text: self.text.clone(),
            header: self.header.clone(),
            changelog: self.changelog.clone(),
            buttons: self.buttons.clone(),
            custom_blocks: self.custom_blocks.clone(),
        })
    }
}

/// 处理 notify 命令（从环境变量读取运行上下文）
pub async fn handle_notify(args: NotifyArgs) -> Result<SendResult> {
    let config = args.to_config()?;
    let context = ActionContext::from_env()?;
    run_notify(&args, &config, &context).await
}

/// 组装并发送消息
pub async fn run_notify(
    args: &NotifyArgs,
    config: &NotifyConfig,
    context: &ActionContext,
) -> Result<SendResult> {
    debug!(
        channel = %config.channel,
        status = %config.status,
        mention = %config.mention,
        if_mention = %config.if_mention,
        fields = %config.fields,
        custom_blocks = config.uses_custom_blocks(),
        "Notify input"
    );

    let github = GitHubClient::new(GitHubConfig {
        api_url: context.api_url.clone(),
        token: args.github_token.clone(),
        timeout_secs: args.timeout,
    })?;

    let message = MessageComposer::new(config, context, &github).build().await?;

    let result = if args.dry_run {
        StdoutChannel.send(&message).await?
    } else {
        let slack = SlackChannel::new(SlackConfig {
            api_url: args.slack_api_url.clone(),
            token: args.slack_token.clone(),
            timeout_secs: args.timeout,
        })?;
        info!(channel = slack.name(), target = %message.channel, "Sending notification");
        slack.send(&message).await?
    };

    debug!(?result, "Notify finished");
    Ok(result)
}

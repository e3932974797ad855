//! Dry-run 渠道：只把 payload 打印到 stdout

use crate::notification::channel::{NotificationChannel, PostMessage, SendResult};
use anyhow::Result;
use tracing::info;

/// 打印 payload，不发送
#[derive(Debug, Default)]
pub struct StdoutChannel;

impl StdoutChannel {
    pub fn render(message: &PostMessage) -> Result<String> {
        Ok(serde_json::to_string_pretty(message)?)
    }
}

impl NotificationChannel for StdoutChannel {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn send(&self, message: &PostMessage) -> Result<SendResult> {
        println!("{}", Self::render(message)?);
        info!(channel = %message.channel, "[DRY-RUN] Message not sent");
        Ok(SendResult::Skipped("dry-run".to_string()))
    }
}

//! 通知渠道 trait 定义

use super::blocks::Block;
use anyhow::Result;
use serde::Serialize;

/// 消息 blocks：组装生成的，或用户提供的原始 JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageBlocks {
    Composed(Vec<Block>),
    Custom(Vec<serde_json::Value>),
}

impl MessageBlocks {
    pub fn len(&self) -> usize {
        match self {
            MessageBlocks::Composed(b) => b.len(),
            MessageBlocks::Custom(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// chat.postMessage 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMessage {
    /// 目标频道
    pub channel: String,
    /// 通知中显示的纯文本（fallback）
    pub text: String,
    /// 消息段
    pub blocks: MessageBlocks,
}

impl PostMessage {
    pub fn new(channel: impl Into<String>, text: impl Into<String>, blocks: MessageBlocks) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            blocks,
        }
    }

    /// 组装生成的 blocks（自定义模式返回 None）
    pub fn composed_blocks(&self) -> Option<&[Block]> {
        match &self.blocks {
            MessageBlocks::Composed(b) => Some(b),
            MessageBlocks::Custom(_) => None,
        }
    }
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功，附带消息时间戳
    Sent { ts: Option<String> },
    /// 跳过（dry-run）
    Skipped(String),
}

/// 通知渠道 trait
#[allow(async_fn_in_trait)]
pub trait NotificationChannel {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 发送消息，失败直接返回错误，不重试
    async fn send(&self, message: &PostMessage) -> Result<SendResult>;
}

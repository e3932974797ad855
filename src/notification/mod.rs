//! 通知层 - 组装 Slack 消息并发送
//!
//! # 流程
//! 1. `NotifyConfig` 提供输入
//! 2. `MessageComposer` 组装 blocks（内部调用 `FieldFactory` 查询 GitHub）
//! 3. `NotificationChannel` 发送（Slack，或 dry-run 时打印）
//!
//! # 使用示例
//! ```ignore
//! use slack_notify::notification::{MessageComposer, SlackChannel, SlackConfig, NotificationChannel};
//!
//! let message = MessageComposer::new(&config, &context, &github).build().await?;
//! let slack = SlackChannel::new(SlackConfig { token, ..Default::default() })?;
//! slack.send(&message).await?;
//! ```

pub mod blocks;
pub mod buttons;
pub mod channel;
pub mod channels;
pub mod composer;
pub mod fields;
pub mod mention;
pub mod status;

pub use blocks::{Block, Button, TextObject};
pub use buttons::parse_buttons;
pub use channel::{MessageBlocks, NotificationChannel, PostMessage, SendResult};
pub use channels::{SlackChannel, SlackConfig, StdoutChannel};
pub use composer::{custom_message, MessageComposer};
pub use fields::{format_duration, Field, FieldFactory, FieldKind, JOB_NOT_FOUND};
pub use mention::{format_mention, inject_mention, mention_text};
pub use status::JobStatus;

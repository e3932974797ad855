//! 通知配置
//!
//! 一次调用对应一份配置，构造后不再修改：
//! - `status` / `if_mention` 统一转为小写
//! - `if_mention` 为空时取 `always`

use crate::notification::mention::ALWAYS;
use anyhow::{bail, Result};

/// 通知配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyConfig {
    pub channel: String,
    pub status: String,
    pub mention: String,
    pub if_mention: String,
    pub fields: String,
    pub text: String,
    pub header: String,
    pub changelog: String,
    pub buttons: String,
    pub custom_blocks: String,
}

impl NotifyConfig {
    /// 规范化输入并校验必填项
    ///
    /// 校验失败时不会发生任何网络请求。
    pub fn new(mut config: NotifyConfig) -> Result<Self> {
        config.status = config.status.trim().to_lowercase();
        config.if_mention = config.if_mention.trim().to_lowercase();
        if config.if_mention.is_empty() {
            config.if_mention = ALWAYS.to_string();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.channel.trim().is_empty() {
            bail!("Input required and not supplied: channel");
        }
        if self.status.is_empty() {
            bail!("Input required and not supplied: status");
        }
        if self.header.is_empty() && self.text.is_empty() && self.custom_blocks.is_empty() {
            bail!("It is required to provide one of the following inputs: 'header', 'text' or 'custom_blocks'.");
        }
        Ok(())
    }

    /// 是否使用自定义 blocks（跳过消息组装）
    pub fn uses_custom_blocks(&self) -> bool {
        !self.custom_blocks.is_empty()
    }
}

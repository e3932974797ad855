//! Slack Notify - 把 GitHub Actions job 的结果发送到 Slack

pub mod cli;
pub mod config;
pub mod github;
pub mod notification;

pub use config::NotifyConfig;
pub use github::{ActionContext, GitHubApi, GitHubClient, GitHubConfig};
pub use notification::{
    JobStatus, MessageComposer, NotificationChannel, PostMessage, SendResult, SlackChannel,
    SlackConfig, StdoutChannel,
};

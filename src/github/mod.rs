//! GitHub 集成 - Actions 运行上下文和 REST API

pub mod client;
pub mod context;
pub mod workflow_command;

pub use client::{GitHubClient, GitHubConfig};
pub use context::{ActionContext, PullRequestRef};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 提交信息（只保留用到的字段）
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

impl Commit {
    /// 提交信息的第一行
    pub fn subject(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }
}

/// workflow run 中的 job
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJob {
    pub id: u64,
    pub name: String,
    /// 排队中的 job 没有开始时间
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// 通知用到的 GitHub API
#[allow(async_fn_in_trait)]
pub trait GitHubApi {
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<Commit>;

    async fn list_jobs_for_workflow_run(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<Vec<WorkflowJob>>;
}

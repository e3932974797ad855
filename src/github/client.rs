//! GitHub REST API 客户端
//!
//! 只实现通知需要的两个接口：
//! - `GET /repos/{owner}/{repo}/commits/{sha}`
//! - `GET /repos/{owner}/{repo}/actions/runs/{run_id}/jobs`

use super::context::DEFAULT_API_URL;
use super::{Commit, GitHubApi, WorkflowJob};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

/// 一次拉取的 job 数量上限
const JOBS_PER_PAGE: u32 = 100;

/// GitHub 客户端配置
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST API 地址（GHES 为 https://host/api/v3）
    pub api_url: String,
    /// Token（GITHUB_TOKEN 或 PAT）
    pub token: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    jobs: Vec<WorkflowJob>,
}

/// GitHub REST 客户端
#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(anyhow!("github_token is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("slack-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!(url = %url, "GitHub API request");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "GitHub API error fetching {}", what);
            return Err(anyhow!("GitHub API error fetching {}: {} - {}", what, status, body));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }
}

impl GitHubApi for GitHubClient {
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<Commit> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.config.api_url, owner, repo, sha
        );
        self.get_json(&url, "commit").await
    }

    async fn list_jobs_for_workflow_run(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<Vec<WorkflowJob>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}/jobs?per_page={}",
            self.config.api_url, owner, repo, run_id, JOBS_PER_PAGE
        );
        let response: JobsResponse = self.get_json(&url, "workflow run jobs").await?;
        debug!(count = response.jobs.len(), run_id, "Listed workflow run jobs");
        Ok(response.jobs)
    }
}

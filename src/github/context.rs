//! GitHub Actions 运行上下文
//!
//! 从 runner 注入的环境变量中读取仓库、提交、ref、workflow run 等信息。
//! 事件 payload 通过 `GITHUB_EVENT_PATH` 指向的 JSON 文件读取，只取 pull request 相关字段。

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// 默认 GitHub 站点
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// 默认 GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// 触发事件中的 pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub number: u64,
    pub head_sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    head: Option<HeadPayload>,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    sha: String,
}

/// workflow 运行上下文
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub server_url: String,
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub git_ref: String,
    pub head_ref: Option<String>,
    pub actor: String,
    pub event_name: String,
    pub workflow: String,
    pub run_id: u64,
    pub run_number: u64,
    /// `GITHUB_JOB`（job 的 key，不含 matrix 后缀）
    pub job: String,
    /// `MATRIX_CONTEXT` 原始 JSON
    pub matrix: Option<String>,
    pub pull_request: Option<PullRequestRef>,
}

impl ActionContext {
    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key -> value 查找函数加载（便于测试）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let repository = get("GITHUB_REPOSITORY")
            .ok_or_else(|| anyhow!("GITHUB_REPOSITORY is not set"))?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty())
            .ok_or_else(|| {
                anyhow!("GITHUB_REPOSITORY must be in owner/repo form, got '{}'", repository)
            })?;

        let run_id = parse_number(get("GITHUB_RUN_ID"), "GITHUB_RUN_ID")?;
        let run_number = parse_number(get("GITHUB_RUN_NUMBER"), "GITHUB_RUN_NUMBER")?;

        let pull_request = match get("GITHUB_EVENT_PATH") {
            Some(path) => read_pull_request(Path::new(&path))?,
            None => None,
        };

        let context = Self {
            server_url: get("GITHUB_SERVER_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_url: get("GITHUB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha: get("GITHUB_SHA").unwrap_or_default(),
            git_ref: get("GITHUB_REF").unwrap_or_default(),
            head_ref: get("GITHUB_HEAD_REF"),
            actor: get("GITHUB_ACTOR").unwrap_or_default(),
            event_name: get("GITHUB_EVENT_NAME").unwrap_or_default(),
            workflow: get("GITHUB_WORKFLOW").unwrap_or_default(),
            run_id,
            run_number,
            job: get("GITHUB_JOB").unwrap_or_default(),
            matrix: get("MATRIX_CONTEXT"),
            pull_request,
        };

        debug!(?context, "Loaded GitHub Actions context");
        Ok(context)
    }

    /// `owner/repo`
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// 仓库页面 URL
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", self.server_url, self.owner, self.repo)
    }

    /// workflow run 页面 URL
    pub fn run_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repo_url(), self.run_id)
    }

    /// checks 使用的 SHA：pull request 事件取 head SHA，否则取 push SHA
    pub fn checks_sha(&self) -> &str {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.head_sha.as_deref())
            .unwrap_or(&self.sha)
    }

    /// job 显示名称
    ///
    /// matrix job 的名称为 `name (v1, v2)`，值按 `MATRIX_CONTEXT` 中的顺序拼接。
    pub fn job_name(&self) -> String {
        let raw = match self.matrix.as_deref() {
            None | Some("null") => return self.job.clone(),
            Some(raw) => raw,
        };

        let matrix: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "MATRIX_CONTEXT is not a JSON object, ignoring it");
                return self.job.clone();
            }
        };

        let values: Vec<String> = matrix.values().map(matrix_value_text).collect();

        let joined = values.join(", ");
        if joined.is_empty() {
            self.job.clone()
        } else {
            format!("{} ({})", self.job, joined)
        }
    }
}

/// matrix 值转文本，和 Actions 生成 job 显示名称时一致：
/// null 为空串，数组用 `,` 拼接元素
fn matrix_value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(matrix_value_text)
            .collect::<Vec<_>>()
            .join(","),
        serde_json::Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

fn parse_number(value: Option<String>, key: &str) -> Result<u64> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{} is not a number: '{}'", key, v)),
        None => Ok(0),
    }
}

fn read_pull_request(path: &Path) -> Result<Option<PullRequestRef>> {
    if !path.exists() {
        warn!(path = %path.display(), "GITHUB_EVENT_PATH does not exist");
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event payload {}", path.display()))?;
    let payload: EventPayload = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event payload {}", path.display()))?;

    Ok(payload.pull_request.map(|pr| PullRequestRef {
        number: pr.number,
        head_sha: pr.head.map(|h| h.sha),
    }))
}

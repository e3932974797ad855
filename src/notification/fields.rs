//! 信息字段解析
//!
//! 根据 `fields` 输入（逗号分隔，或 `all`）生成 Slack fields。
//! 输出顺序固定，值为空的字段会被省略。
//!
//! 远程调用是惰性的：
//! - 只有请求了 `message` 才查询 commit
//! - `job` 和 `duration` 共用一次 job 列表查询

use super::blocks::TextObject;
use crate::github::{workflow_command, ActionContext, GitHubApi, WorkflowJob};
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// 找不到当前 job 时的占位文本
pub const JOB_NOT_FOUND: &str = "Job is not found.";

const JOB_NOT_FOUND_HINT: &str = "Job is not found. This can happen if the job is part of a matrix build, but the matrix context was not passed as env variable. Please pass it as MATRIX_CONTEXT: ${{ toJson(matrix) }}.";

/// 请求全部字段
pub const ALL_FIELDS: &str = "all";

/// 可请求的字段（按输出顺序排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Repo,
    Message,
    Commit,
    Actor,
    Job,
    Duration,
    EventName,
    Ref,
    PullRequest,
    Workflow,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Repo,
        FieldKind::Message,
        FieldKind::Commit,
        FieldKind::Actor,
        FieldKind::Job,
        FieldKind::Duration,
        FieldKind::EventName,
        FieldKind::Ref,
        FieldKind::PullRequest,
        FieldKind::Workflow,
    ];

    /// 输入中可用的名称（第一个为规范名称）
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Repo => &["repo", "repository"],
            FieldKind::Message => &["message"],
            FieldKind::Commit => &["commit"],
            FieldKind::Actor => &["actor"],
            FieldKind::Job => &["job"],
            FieldKind::Duration => &["duration"],
            FieldKind::EventName => &["eventName", "event"],
            FieldKind::Ref => &["ref"],
            FieldKind::PullRequest => &["pr", "pull_request"],
            FieldKind::Workflow => &["workflow"],
        }
    }
}

/// 标题 + 值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub title: String,
    pub value: String,
}

impl Field {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }

    /// `*Title*\nvalue`
    pub fn render(&self) -> TextObject {
        TextObject::mrkdwn(format!("*{}*\n{}", self.title, self.value))
    }
}

/// 去掉 `refs/heads/` 或 `refs/tags/` 前缀
fn extract_name(git_ref: &str) -> &str {
    git_ref
        .strip_prefix("refs/heads/")
        .or_else(|| git_ref.strip_prefix("refs/tags/"))
        .unwrap_or(git_ref)
}

/// 把耗时格式化为 `H hour M min S sec`，为 0 的部分省略
pub fn format_duration(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{} hour", h));
    }
    if m > 0 {
        parts.push(format!("{} min", m));
    }
    if s > 0 {
        parts.push(format!("{} sec", s));
    }
    parts.join(" ")
}

/// 当前 job 的查询结果，`job` 和 `duration` 共用
enum JobLookup {
    Pending,
    Found(WorkflowJob),
    NotFound,
}

/// 字段工厂
pub struct FieldFactory<'a, G> {
    requested: Vec<String>,
    job_name: String,
    context: &'a ActionContext,
    github: &'a G,
    now: DateTime<Utc>,
}

impl<'a, G: GitHubApi> FieldFactory<'a, G> {
    pub fn new(fields: &str, context: &'a ActionContext, github: &'a G) -> Self {
        let requested = fields
            .split(',')
            .map(|f| f.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|f| !f.is_empty())
            .collect();

        Self {
            requested,
            job_name: context.job_name(),
            context,
            github,
            now: Utc::now(),
        }
    }

    /// 指定计算 duration 的当前时间
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// 是否请求了该字段
    pub fn includes(&self, kind: FieldKind) -> bool {
        self.requested
            .iter()
            .any(|r| r == ALL_FIELDS || kind.names().contains(&r.as_str()))
    }

    /// 按固定顺序解析所有请求的字段
    pub async fn fields(&self) -> Result<Vec<Field>> {
        let mut job = JobLookup::Pending;
        let mut fields = Vec::new();

        for kind in FieldKind::ALL {
            if !self.includes(kind) {
                continue;
            }

            let field = match kind {
                FieldKind::Repo => Some(Field::new("Repository", self.repo())),
                FieldKind::Message => Some(Field::new("Message", self.message().await?)),
                FieldKind::Commit => Some(Field::new("Commit", self.commit())),
                FieldKind::Actor => Some(Field::new("Actor", self.actor())),
                FieldKind::Job => {
                    self.load_job(&mut job).await?;
                    Some(Field::new("Job", self.job(&job)))
                }
                FieldKind::Duration => {
                    self.load_job(&mut job).await?;
                    Some(Field::new("Duration", self.duration(&job)))
                }
                FieldKind::EventName => {
                    Some(Field::new("Event", self.context.event_name.clone()))
                }
                FieldKind::Ref => {
                    let (title, value) = self.git_ref();
                    Some(Field::new(title, value))
                }
                FieldKind::PullRequest => self.pr().map(|v| Field::new("Pull request", v)),
                FieldKind::Workflow => Some(Field::new("Workflow", self.workflow())),
            };

            match field {
                Some(f) if !f.value.is_empty() => fields.push(f),
                _ => debug!(field = kind.names()[0], "Field has no value, skipping"),
            }
        }

        Ok(fields)
    }

    async fn load_job(&self, lookup: &mut JobLookup) -> Result<()> {
        if !matches!(lookup, JobLookup::Pending) {
            return Ok(());
        }

        let jobs = self
            .github
            .list_jobs_for_workflow_run(&self.context.owner, &self.context.repo, self.context.run_id)
            .await?;

        *lookup = match jobs.into_iter().find(|j| j.name == self.job_name) {
            Some(job) => JobLookup::Found(job),
            None => {
                warn!(job = %self.job_name, run_id = self.context.run_id, "{}", JOB_NOT_FOUND_HINT);
                workflow_command::warning(JOB_NOT_FOUND_HINT);
                JobLookup::NotFound
            }
        };
        Ok(())
    }

    fn repo(&self) -> String {
        format!("<{}|{}>", self.context.repo_url(), self.context.repository())
    }

    async fn message(&self) -> Result<String> {
        let commit = self
            .github
            .get_commit(&self.context.owner, &self.context.repo, &self.context.sha)
            .await?;
        Ok(format!("<{}|{}>", commit.html_url, commit.subject()))
    }

    fn commit(&self) -> String {
        let sha = &self.context.sha;
        let short: String = sha.chars().take(8).collect();
        format!("<{}/commit/{}|{}>", self.context.repo_url(), sha, short)
    }

    fn actor(&self) -> String {
        let actor = &self.context.actor;
        format!("<{}/{}|{}>", self.context.server_url, actor, actor)
    }

    fn job(&self, lookup: &JobLookup) -> String {
        match lookup {
            JobLookup::Found(job) => format!(
                "<{}/runs/{}|{}>",
                self.context.repo_url(),
                job.id,
                self.job_name
            ),
            _ => JOB_NOT_FOUND.to_string(),
        }
    }

    fn duration(&self, lookup: &JobLookup) -> String {
        match lookup {
            JobLookup::Found(job) => job
                .started_at
                .map(|started| format_duration(self.now - started))
                .unwrap_or_default(),
            _ => JOB_NOT_FOUND.to_string(),
        }
    }

    /// 返回 (标题, 值)
    fn git_ref(&self) -> (&'static str, String) {
        let git_ref = &self.context.git_ref;
        let repo_url = self.context.repo_url();
        let tree = |branch: &str| format!("`<{}/tree/{}|{}>`", repo_url, branch, branch);

        if let Some(tag) = git_ref.strip_prefix("refs/tags/") {
            ("Tag", format!("`<{}/releases/tag/{}|{}>`", repo_url, tag, tag))
        } else if let Some(branch) = git_ref.strip_prefix("refs/heads/") {
            ("Branch", tree(branch))
        } else if git_ref.starts_with("refs/pull/") || git_ref.contains("pulls") {
            match self.context.head_ref.as_deref() {
                Some(head) => ("Branch", tree(extract_name(head))),
                None => ("Branch", git_ref.clone()),
            }
        } else {
            ("Branch", git_ref.clone())
        }
    }

    fn pr(&self) -> Option<String> {
        self.context.pull_request.as_ref().map(|pr| {
            format!(
                "<{}/pull/{}|#{}>",
                self.context.repo_url(),
                pr.number,
                pr.number
            )
        })
    }

    fn workflow(&self) -> String {
        format!(
            "<{}/commit/{}/checks|{}>",
            self.context.repo_url(),
            self.context.checks_sha(),
            self.context.workflow
        )
    }
}

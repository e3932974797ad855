//! Job status classification for notifications
//!
//! The status decides two things:
//! - which icon the footer shows
//! - whether a mention may be injected into the message text
//!
//! Only `success`, `failure` and `cancelled` are terminal statuses. Anything
//! else is treated as "still running" for the icon and is rejected when a
//! mention has to be rendered.

use anyhow::{bail, Result};

/// Job outcome as reported by the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failure,
    Cancelled,
    Other(String),
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JobStatus {
    /// Parse a status string (case-insensitive, surrounding whitespace ignored)
    pub fn parse(status: &str) -> Self {
        let normalized = status.trim().to_lowercase();
        match normalized.as_str() {
            "success" => JobStatus::Success,
            "failure" => JobStatus::Failure,
            "cancelled" => JobStatus::Cancelled,
            _ => JobStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Success => "success",
            JobStatus::Failure => "failure",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Other(s) => s,
        }
    }

    /// Slack emoji shown in the message footer
    pub fn icon(&self) -> &'static str {
        match self {
            JobStatus::Success => ":white_check_mark:",
            JobStatus::Failure => ":no_entry:",
            JobStatus::Cancelled => ":warning:",
            JobStatus::Other(_) => ":arrows_counterclockwise:",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Other(_))
    }

    /// Mentions are only allowed for terminal statuses
    pub fn require_terminal(&self) -> Result<()> {
        if !self.is_terminal() {
            bail!("invalid status: {}", self.as_str());
        }
        Ok(())
    }
}

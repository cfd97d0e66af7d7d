use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/closed state of a tracked issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// An issue owned by the remote tracker. The engine only ever reads these
/// and requests mutations; it never caches them beyond one reconciliation
/// pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub updated_at: DateTime<Utc>,
    pub labels: Vec<String>,
    pub url: String,
}

/// A comment on a tracked issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
    pub url: String,
}

/// Request payload for creating a new issue.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

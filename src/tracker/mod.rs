pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// Boundary to the remote issue tracker. Every call is fail-fast: transport,
/// auth, and rate-limit errors surface as a single `AppError::Tracker` and
/// abort the current repository's reconciliation.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// List all issues carrying the tracking label, open and closed,
    /// across pagination.
    async fn list_tracked_issues(
        &self,
        repository: &str,
        label: &str,
    ) -> Result<Vec<TrackedIssue>>;

    /// List all comments on an issue, across pagination.
    async fn list_comments(&self, repository: &str, issue: &TrackedIssue)
        -> Result<Vec<Comment>>;

    /// Create a new issue.
    async fn create_issue(&self, repository: &str, new_issue: &NewIssue) -> Result<TrackedIssue>;

    /// Post a comment on an issue.
    async fn post_comment(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        body: &str,
    ) -> Result<Comment>;

    /// Transition an issue to open or closed.
    async fn set_state(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        state: IssueState,
    ) -> Result<()>;

    /// Replace an issue's full label set.
    async fn set_labels(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        labels: &[String],
    ) -> Result<()>;

    /// Whether the repository has its issue tracker enabled.
    async fn issues_enabled(&self, repository: &str) -> Result<bool>;

    /// Turn the repository's issue tracker on.
    async fn enable_issues(&self, repository: &str) -> Result<()>;
}

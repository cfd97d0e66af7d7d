use async_trait::async_trait;
use octocrab::Octocrab;

use crate::config::TrackerConfig;
use crate::error::{AppError, Result};
use crate::tracker::types::*;
use crate::tracker::TrackerClient;

use super::mapper;

pub struct GitHubTracker {
    client: Octocrab,
}

impl GitHubTracker {
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = &config.token {
            builder = builder.personal_token(token.clone());
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Tracker(format!("Failed to build octocrab client: {e}")))?;

        Ok(Self { client })
    }

    fn parse_repo(repo_full_name: &str) -> Result<(&str, &str)> {
        let parts: Vec<&str> = repo_full_name.splitn(2, '/').collect();
        if parts.len() != 2 {
            return Err(AppError::Tracker(format!(
                "Invalid repo name: {repo_full_name}"
            )));
        }
        Ok((parts[0], parts[1]))
    }
}

#[async_trait]
impl TrackerClient for GitHubTracker {
    async fn list_tracked_issues(
        &self,
        repository: &str,
        label: &str,
    ) -> Result<Vec<TrackedIssue>> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let labels = vec![label.to_string()];
        let page = self
            .client
            .issues(owner, repo)
            .list()
            .labels(&labels)
            .state(octocrab::params::State::All)
            .per_page(100)
            .send()
            .await?;

        let issues = self.client.all_pages(page).await?;

        // The issues endpoint also returns pull requests; drop them.
        Ok(issues
            .iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(mapper::map_issue)
            .collect())
    }

    async fn list_comments(
        &self,
        repository: &str,
        issue: &TrackedIssue,
    ) -> Result<Vec<Comment>> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let page = self
            .client
            .issues(owner, repo)
            .list_comments(issue.number)
            .per_page(100)
            .send()
            .await?;

        let comments = self.client.all_pages(page).await?;

        Ok(comments.into_iter().map(mapper::map_comment).collect())
    }

    async fn create_issue(&self, repository: &str, new_issue: &NewIssue) -> Result<TrackedIssue> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let created = self
            .client
            .issues(owner, repo)
            .create(&new_issue.title)
            .body(&new_issue.body)
            .labels(new_issue.labels.clone())
            .send()
            .await?;

        Ok(mapper::map_issue(&created))
    }

    async fn post_comment(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        body: &str,
    ) -> Result<Comment> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let comment = self
            .client
            .issues(owner, repo)
            .create_comment(issue.number, body)
            .await?;

        Ok(mapper::map_comment(comment))
    }

    async fn set_state(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        state: IssueState,
    ) -> Result<()> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let state = match state {
            IssueState::Open => octocrab::models::IssueState::Open,
            IssueState::Closed => octocrab::models::IssueState::Closed,
        };

        self.client
            .issues(owner, repo)
            .update(issue.number)
            .state(state)
            .send()
            .await?;

        Ok(())
    }

    async fn set_labels(
        &self,
        repository: &str,
        issue: &TrackedIssue,
        labels: &[String],
    ) -> Result<()> {
        let (owner, repo) = Self::parse_repo(repository)?;

        // octocrab doesn't have a replace-all-labels builder, use the API directly
        let url = format!(
            "/repos/{owner}/{repo}/issues/{number}/labels",
            number = issue.number
        );
        let body = serde_json::json!({ "labels": labels });
        let _: serde_json::Value = self
            .client
            .put(&url, Some(&body))
            .await
            .map_err(|e| AppError::Tracker(format!("Failed to set labels: {e}")))?;

        Ok(())
    }

    async fn issues_enabled(&self, repository: &str) -> Result<bool> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let meta = self.client.repos(owner, repo).get().await?;

        Ok(meta.has_issues.unwrap_or(false))
    }

    async fn enable_issues(&self, repository: &str) -> Result<()> {
        let (owner, repo) = Self::parse_repo(repository)?;

        let url = format!("/repos/{owner}/{repo}");
        let body = serde_json::json!({ "has_issues": true });
        let _: serde_json::Value = self
            .client
            .patch(&url, Some(&body))
            .await
            .map_err(|e| AppError::Tracker(format!("Failed to enable issues: {e}")))?;

        Ok(())
    }
}

pub mod comments;
pub mod labels;
pub mod matcher;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ReconcileConfig;
use crate::error::{AppError, Result};
use crate::outcome::{self, IssueSpec, OutcomeRecord};
use crate::report::{Action, DecisionEvent, Reporter, RunCounters};
use crate::tracker::types::{IssueState, NewIssue, TrackedIssue};
use crate::tracker::TrackerClient;

/// Outcome of one reconciliation run. Counters accumulate across all
/// repositories; a tracker failure aborts only the repository it occurred in.
#[derive(Debug)]
pub struct RunReport {
    pub counters: RunCounters,
    pub total: usize,
    pub failures: Vec<RepoFailure>,
}

#[derive(Debug)]
pub struct RepoFailure {
    pub repository: String,
    pub error: AppError,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The per-rule decision state machine, orchestrating matcher, comment
/// deduplicator, label reconciler, and the tracker-client boundary.
pub struct Reconciler {
    client: Arc<dyn TrackerClient>,
    reporter: Arc<dyn Reporter>,
    label: String,
    remind_after_days: f64,
    dry_run: bool,
    apply_severity: bool,
    ensure_issues_enabled: bool,
}

impl Reconciler {
    pub fn new(
        client: Arc<dyn TrackerClient>,
        reporter: Arc<dyn Reporter>,
        label: impl Into<String>,
        config: &ReconcileConfig,
    ) -> Self {
        Self {
            client,
            reporter,
            label: label.into(),
            remind_after_days: config.remind_after_days,
            dry_run: config.dry_run,
            apply_severity: config.apply_severity,
            ensure_issues_enabled: config.ensure_issues_enabled,
        }
    }

    /// Reconcile one batch of outcome records against the tracker.
    /// Repositories are processed sequentially in lexicographic order.
    pub async fn run(&self, records: Vec<OutcomeRecord>) -> RunReport {
        let total = records.len();
        let now = Utc::now();
        let mut counters = RunCounters::default();
        let mut failures = Vec::new();

        for (repository, repo_records) in outcome::group_by_repository(records) {
            tracing::info!(repo = %repository, rules = repo_records.len(), "Reconciling repository");
            if let Err(error) = self
                .process_repo(&repository, &repo_records, now, &mut counters)
                .await
            {
                tracing::error!(repo = %repository, error = %error, "Aborting repository");
                failures.push(RepoFailure { repository, error });
            }
        }

        self.reporter.summary(&counters, total);

        RunReport {
            counters,
            total,
            failures,
        }
    }

    async fn process_repo(
        &self,
        repository: &str,
        records: &[OutcomeRecord],
        now: DateTime<Utc>,
        counters: &mut RunCounters,
    ) -> Result<()> {
        if self.ensure_issues_enabled && !self.client.issues_enabled(repository).await? {
            self.report(repository, "", Action::EnablingIssues, None);
            if !self.dry_run {
                self.client.enable_issues(repository).await?;
            }
        }

        // Snapshot the full tracked-issue set before any mutation; every rule
        // in this repository matches against the same listing.
        let snapshot = self
            .client
            .list_tracked_issues(repository, &self.label)
            .await?;

        for record in records {
            self.process_rule(repository, record, &snapshot, now, counters)
                .await?;
        }

        Ok(())
    }

    async fn process_rule(
        &self,
        repository: &str,
        record: &OutcomeRecord,
        snapshot: &[TrackedIssue],
        now: DateTime<Utc>,
        counters: &mut RunCounters,
    ) -> Result<()> {
        let rule = record.rule.as_str();
        let spec = record
            .issue
            .clone()
            .unwrap_or_else(|| IssueSpec::fallback(rule));

        let mut issue = matcher::find_canonical(rule, spec.reopen, snapshot).cloned();

        if record.passed {
            counters.passes += 1;
            match issue.as_ref() {
                Some(existing) if existing.state == IssueState::Open => {
                    counters.closed_issues += 1;
                    self.report(repository, rule, Action::Closing, Some(&existing.url));
                    if !self.dry_run {
                        let body = comments::close(&spec.comments, rule);
                        self.client.post_comment(repository, existing, &body).await?;
                        self.client
                            .set_state(repository, existing, IssueState::Closed)
                            .await?;
                    }
                }
                Some(existing) => {
                    self.report(repository, rule, Action::Resolved, Some(&existing.url));
                }
                None => {
                    self.report(repository, rule, Action::NoIssue, None);
                }
            }
        } else {
            match issue.as_ref() {
                Some(existing) if existing.state == IssueState::Open => {
                    let stale_days =
                        (now - existing.updated_at).num_seconds() as f64 / 86_400.0;
                    if stale_days >= self.remind_after_days {
                        if spec.remind {
                            counters.reminded_issues += 1;
                            self.report(repository, rule, Action::Reminding, Some(&existing.url));
                            if !self.dry_run {
                                let body = comments::update(&spec.comments, rule);
                                self.client.post_comment(repository, existing, &body).await?;
                            }
                        } else {
                            self.report(
                                repository,
                                rule,
                                Action::RemindersDisabled,
                                Some(&existing.url),
                            );
                        }
                    } else {
                        self.report(repository, rule, Action::SkippedRecent, Some(&existing.url));
                    }
                }
                Some(existing) => {
                    counters.reopened_issues += 1;
                    self.report(repository, rule, Action::Reopening, Some(&existing.url));
                    if !self.dry_run {
                        let body = comments::reopen(&spec.comments, rule);
                        self.client.post_comment(repository, existing, &body).await?;
                        self.client
                            .set_state(repository, existing, IssueState::Open)
                            .await?;
                    }
                }
                None => {
                    counters.new_issues += 1;
                    if self.dry_run {
                        self.report(repository, rule, Action::Creating, None);
                    } else {
                        let mut labels = vec![self.label.clone()];
                        if self.apply_severity {
                            if let Some(severity) = &record.severity {
                                labels.push(severity.clone());
                            }
                        }
                        let created = self
                            .client
                            .create_issue(
                                repository,
                                &NewIssue {
                                    title: format!("[{rule}] {}", spec.title),
                                    body: comments::create(&spec.comments, rule),
                                    labels,
                                },
                            )
                            .await?;
                        self.report(repository, rule, Action::Creating, Some(&created.url));
                        // Subsequent comment/label steps for this rule target
                        // the fresh issue; the snapshot itself is not updated.
                        issue = Some(created);
                    }
                }
            }
        }

        if !record.messages.is_empty() {
            match issue.as_ref() {
                Some(existing) => {
                    self.sync_comments(repository, rule, existing, &record.messages)
                        .await?;
                }
                // Dry-run creation was elided; nothing to inspect, count only.
                None if self.dry_run && !record.passed => {
                    self.report(
                        repository,
                        rule,
                        Action::CommentsPreviewed(record.messages.len()),
                        None,
                    );
                }
                None => {}
            }
        }

        if self.apply_severity {
            if let (Some(existing), Some(severity)) = (issue.as_ref(), record.severity.as_deref())
            {
                self.sync_labels(repository, rule, existing, severity).await?;
            }
        }

        Ok(())
    }

    /// Post each desired diagnostic message that has no byte-identical
    /// existing comment, preserving order.
    async fn sync_comments(
        &self,
        repository: &str,
        rule: &str,
        issue: &TrackedIssue,
        messages: &[String],
    ) -> Result<()> {
        let existing = self.client.list_comments(repository, issue).await?;
        let missing = comments::missing_messages(&existing, messages);

        for message in messages {
            if missing.contains(&message) {
                self.report(repository, rule, Action::CommentAdding, Some(&issue.url));
                if !self.dry_run {
                    self.client.post_comment(repository, issue, message).await?;
                }
            } else {
                self.report(repository, rule, Action::CommentExists, Some(&issue.url));
            }
        }

        Ok(())
    }

    async fn sync_labels(
        &self,
        repository: &str,
        rule: &str,
        issue: &TrackedIssue,
        severity: &str,
    ) -> Result<()> {
        if let Some(new_labels) = labels::reconcile(&issue.labels, severity) {
            self.report(repository, rule, Action::LabelsUpdating, Some(&issue.url));
            if !self.dry_run {
                self.client.set_labels(repository, issue, &new_labels).await?;
            }
        }
        Ok(())
    }

    fn report(&self, repository: &str, rule: &str, action: Action, issue_url: Option<&str>) {
        self.reporter.decision(&DecisionEvent {
            repository: repository.to_string(),
            rule: rule.to_string(),
            action,
            issue_url: issue_url.map(str::to_string),
        });
    }
}

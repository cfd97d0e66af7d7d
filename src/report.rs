/// Aggregate counts for one reconciliation run. Owned by the engine,
/// returned to the caller; never process-global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub passes: usize,
    pub new_issues: usize,
    pub closed_issues: usize,
    pub reopened_issues: usize,
    pub reminded_issues: usize,
}

/// One engine decision, emitted exactly once per rule action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Passed, no issue ever tracked.
    NoIssue,
    /// Passed, matching issue already closed.
    Resolved,
    /// Passed, open issue being closed.
    Closing,
    /// Failed, no matching issue; creating one.
    Creating,
    /// Failed, open issue stale; posting a reminder.
    Reminding,
    /// Failed, open issue updated too recently for a reminder.
    SkippedRecent,
    /// Failed, open issue stale but the record disables reminders.
    RemindersDisabled,
    /// Failed, closed issue being reopened.
    Reopening,
    /// Desired diagnostic comment already present.
    CommentExists,
    /// Posting a missing diagnostic comment.
    CommentAdding,
    /// Dry-run with no issue to inspect; comments counted only.
    CommentsPreviewed(usize),
    /// Severity label set differs; rewriting labels.
    LabelsUpdating,
    /// Repository has its issue tracker turned off; enabling it.
    EnablingIssues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEvent {
    pub repository: String,
    pub rule: String,
    pub action: Action,
    pub issue_url: Option<String>,
}

/// Sink for engine decisions. The engine is indifferent to rendering;
/// tests record events, production logs them.
pub trait Reporter: Send + Sync {
    fn decision(&self, event: &DecisionEvent);
    fn summary(&self, counters: &RunCounters, total: usize);
}

/// Renders decisions as structured tracing events.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn decision(&self, event: &DecisionEvent) {
        let target = event
            .issue_url
            .as_deref()
            .unwrap_or(event.repository.as_str());
        match &event.action {
            Action::NoIssue => {
                tracing::info!(rule = %event.rule, "ok (no issue): {target}")
            }
            Action::Resolved => {
                tracing::info!(rule = %event.rule, "ok (resolved): {target}")
            }
            Action::Closing => {
                tracing::info!(rule = %event.rule, "ok (closing...): {target}")
            }
            Action::Creating => {
                tracing::info!(rule = %event.rule, "not ok (creating...): {target}")
            }
            Action::Reminding => {
                tracing::info!(rule = %event.rule, "not ok (reminding...): {target}")
            }
            Action::SkippedRecent => {
                tracing::info!(rule = %event.rule, "not ok (recent): {target}")
            }
            Action::RemindersDisabled => {
                tracing::info!(rule = %event.rule, "not ok (reminders disabled): {target}")
            }
            Action::Reopening => {
                tracing::info!(rule = %event.rule, "not ok (re-opening...): {target}")
            }
            Action::CommentExists => {
                tracing::info!(rule = %event.rule, "comment (exists): {target}")
            }
            Action::CommentAdding => {
                tracing::info!(rule = %event.rule, "comment (adding...): {target}")
            }
            Action::CommentsPreviewed(count) => {
                let plural = if *count == 1 { "" } else { "s" };
                tracing::info!(rule = %event.rule, "{count} comment{plural} (adding...)")
            }
            Action::LabelsUpdating => {
                tracing::info!(rule = %event.rule, "labels (updating...): {target}")
            }
            Action::EnablingIssues => {
                tracing::info!("issues disabled (enabling...): {target}")
            }
        }
    }

    fn summary(&self, counters: &RunCounters, total: usize) {
        tracing::info!("passed {} out of {}", counters.passes, total);
        tracing::info!(
            "issues: {} new, {} closed, {} re-opened, {} reminded",
            counters.new_issues,
            counters.closed_issues,
            counters.reopened_issues,
            counters.reminded_issues
        );
    }
}

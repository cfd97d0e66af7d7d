use crate::tracker::types::{IssueState, TrackedIssue};

/// Select the canonical issue for a rule out of the repository's tracked
/// issues.
///
/// Candidates are correlated by the `[<rule>]` tag appearing in the title,
/// ordered by update time. The most recently updated open issue wins; when
/// none is open and `allow_reopen` holds, the most recently updated issue of
/// any state is selected (it will be reopened by the engine).
pub fn find_canonical<'a>(
    rule: &str,
    allow_reopen: bool,
    candidates: &'a [TrackedIssue],
) -> Option<&'a TrackedIssue> {
    let tag = format!("[{rule}]");

    let mut matching: Vec<&TrackedIssue> = candidates
        .iter()
        .filter(|issue| issue.title.contains(&tag))
        .collect();
    matching.sort_by_key(|issue| issue.updated_at);

    let last_open = matching
        .iter()
        .rev()
        .find(|issue| issue.state == IssueState::Open)
        .copied();

    match last_open {
        Some(issue) => Some(issue),
        None if allow_reopen => matching.last().copied(),
        None => None,
    }
}

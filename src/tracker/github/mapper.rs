use crate::tracker::types;

/// Map octocrab Issue to our tracker issue type.
pub fn map_issue(issue: &octocrab::models::issues::Issue) -> types::TrackedIssue {
    types::TrackedIssue {
        number: issue.number,
        title: issue.title.clone(),
        state: match issue.state {
            octocrab::models::IssueState::Open => types::IssueState::Open,
            _ => types::IssueState::Closed,
        },
        updated_at: issue.updated_at,
        labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
        url: issue.html_url.to_string(),
    }
}

pub fn map_comment(comment: octocrab::models::issues::Comment) -> types::Comment {
    types::Comment {
        body: comment.body.unwrap_or_default(),
        url: comment.html_url.to_string(),
    }
}

use crate::outcome::CommentOverrides;
use crate::tracker::types::Comment;

/// Comment body for a freshly created issue.
pub fn create(overrides: &CommentOverrides, rule: &str) -> String {
    overrides
        .create
        .clone()
        .unwrap_or_else(|| format!("Please fix rule **{rule}**"))
}

/// Reminder comment for a stale open issue.
pub fn update(overrides: &CommentOverrides, rule: &str) -> String {
    overrides
        .update
        .clone()
        .unwrap_or_else(|| format!("Reminder: {}", create_mid_sentence(overrides, rule)))
}

/// Comment posted when a resolved issue is closed.
pub fn close(overrides: &CommentOverrides, rule: &str) -> String {
    overrides
        .close
        .clone()
        .unwrap_or_else(|| format!("Rule **{rule}** fixed"))
}

/// Comment posted when a regressed issue is reopened.
pub fn reopen(overrides: &CommentOverrides, rule: &str) -> String {
    overrides
        .reopen
        .clone()
        .unwrap_or_else(|| format!("Re-opened: {}", create_mid_sentence(overrides, rule)))
}

/// The create template with its first character lower-cased, so the reopen
/// and reminder fallbacks read naturally mid-sentence.
fn create_mid_sentence(overrides: &CommentOverrides, rule: &str) -> String {
    let text = create(overrides, rule);
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => text,
    }
}

/// Which desired messages have no byte-identical existing comment, in the
/// original order. Re-running against an issue that already carries every
/// message yields nothing to post.
pub fn missing_messages<'a>(existing: &[Comment], desired: &'a [String]) -> Vec<&'a String> {
    desired
        .iter()
        .filter(|message| !existing.iter().any(|comment| comment.body == **message))
        .collect()
}

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// One rule-check result for one repository, produced by the external
/// ingester. Immutable; one per rule-check per run.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeRecord {
    #[serde(alias = "repo")]
    pub repository: String,
    pub rule: String,
    pub passed: bool,
    #[serde(default)]
    pub issue: Option<IssueSpec>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Per-rule issue customization carried by an outcome record.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueSpec {
    pub title: String,
    /// Whether a closed matching issue may be reopened.
    #[serde(default = "default_true")]
    pub reopen: bool,
    /// Whether stale open issues get reminder comments.
    #[serde(default = "default_true")]
    pub remind: bool,
    #[serde(default)]
    pub comments: CommentOverrides,
}

/// Optional overrides for the templated comment bodies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentOverrides {
    pub create: Option<String>,
    pub update: Option<String>,
    pub close: Option<String>,
    pub reopen: Option<String>,
}

impl IssueSpec {
    /// The spec used when a record carries none.
    pub fn fallback(rule: &str) -> Self {
        Self {
            title: format!("Fix rule {rule}"),
            reopen: true,
            remind: true,
            comments: CommentOverrides::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Parse a single JSON outcome record, rejecting structurally unusable ones.
pub fn parse_record(line: &str) -> Result<OutcomeRecord> {
    let record: OutcomeRecord = serde_json::from_str(line)?;
    if record.repository.is_empty() {
        return Err(AppError::Validation("missing repository".to_string()));
    }
    if record.rule.is_empty() {
        return Err(AppError::Validation("missing rule".to_string()));
    }
    Ok(record)
}

/// Read JSON-lines outcome records. Invalid records are skipped with a
/// warning; they are never fatal to the run.
pub fn read_records(reader: impl BufRead) -> Result<Vec<OutcomeRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping invalid outcome record");
            }
        }
    }
    Ok(records)
}

/// Group records by repository, preserving per-repository input order.
/// BTreeMap keeps repository processing order deterministic across runs.
pub fn group_by_repository(records: Vec<OutcomeRecord>) -> BTreeMap<String, Vec<OutcomeRecord>> {
    let mut groups: BTreeMap<String, Vec<OutcomeRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.repository.clone()).or_default().push(record);
    }
    groups
}

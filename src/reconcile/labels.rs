/// The label vocabulary reserved for severity.
pub const SEVERITY_LEVELS: [&str; 2] = ["warning", "error"];

/// Compute the minimal label mutation that leaves exactly `severity` out of
/// the severity vocabulary on the issue. Labels outside the vocabulary are
/// untouched. Returns `None` when the current set already satisfies that,
/// so callers can skip the redundant write.
pub fn reconcile(current: &[String], severity: &str) -> Option<Vec<String>> {
    let mut labels: Vec<String> = current
        .iter()
        .filter(|name| *name == severity || !SEVERITY_LEVELS.contains(&name.as_str()))
        .cloned()
        .collect();

    let mut changed = labels.len() < current.len();
    if !labels.iter().any(|name| name == severity) {
        labels.push(severity.to_string());
        changed = true;
    }

    changed.then_some(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_adds_missing_severity() {
        let current = labels(&["ghlint"]);
        let updated = reconcile(&current, "error").unwrap();
        assert_eq!(updated, labels(&["ghlint", "error"]));
    }

    #[test]
    fn test_replaces_other_severity() {
        let current = labels(&["ghlint", "warning"]);
        let updated = reconcile(&current, "error").unwrap();
        assert_eq!(updated, labels(&["ghlint", "error"]));
    }

    #[test]
    fn test_no_change_when_severity_present() {
        let current = labels(&["ghlint", "error"]);
        assert!(reconcile(&current, "error").is_none());
    }

    #[test]
    fn test_keeps_unrelated_labels() {
        let current = labels(&["bug", "warning", "help wanted"]);
        let updated = reconcile(&current, "error").unwrap();
        assert_eq!(updated, labels(&["bug", "help wanted", "error"]));
    }

    #[test]
    fn test_removes_stale_severity_even_when_target_present() {
        let current = labels(&["warning", "error"]);
        let updated = reconcile(&current, "error").unwrap();
        assert_eq!(updated, labels(&["error"]));
    }
}

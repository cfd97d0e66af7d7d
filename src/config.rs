use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

#[derive(Deserialize, Clone, Default)]
pub struct TrackerConfig {
    /// Personal access token for the tracker API. Unauthenticated
    /// access works for public repositories but is heavily rate-limited.
    #[serde(default)]
    pub token: Option<String>,
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReconcileConfig {
    /// Label scoping which issues belong to this reconciliation process.
    /// Required; there is deliberately no default.
    pub label: Option<String>,
    /// Days since an open issue's last update before a reminder is posted.
    #[serde(default = "default_remind_after_days")]
    pub remind_after_days: f64,
    /// Compute every decision but skip all mutating tracker calls.
    #[serde(default)]
    pub dry_run: bool,
    /// Apply per-record severity values as issue labels.
    #[serde(default)]
    pub apply_severity: bool,
    /// Enable the issue tracker on repositories where it is turned off.
    #[serde(default)]
    pub ensure_issues_enabled: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            label: None,
            remind_after_days: default_remind_after_days(),
            dry_run: false,
            apply_severity: false,
            ensure_issues_enabled: false,
        }
    }
}

fn default_remind_after_days() -> f64 {
    7.0
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(
                config::File::with_name("rulewarden")
                    .required(false),
            );
        }

        // Environment variable overrides with RULEWARDEN_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("RULEWARDEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// The tracking label, validated present.
    pub fn tracking_label(&self) -> Result<&str> {
        self.reconcile
            .label
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| AppError::Config("tracking label is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_label_required() {
        let config = AppConfig::default();
        assert!(config.tracking_label().is_err());
    }

    #[test]
    fn test_tracking_label_present() {
        let mut config = AppConfig::default();
        config.reconcile.label = Some("ghlint".to_string());
        assert_eq!(config.tracking_label().unwrap(), "ghlint");
    }

    #[test]
    fn test_reconcile_defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.remind_after_days, 7.0);
        assert!(!config.dry_run);
        assert!(!config.apply_severity);
        assert!(!config.ensure_issues_enabled);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TrackerConfig {
            token: Some("ghp_secret".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("REDACTED"));
    }
}

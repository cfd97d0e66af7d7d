use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid outcome record: {0}")]
    Validation(String),

    #[error("Tracker API error: {0}")]
    Tracker(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for AppError {
    fn from(e: octocrab::Error) -> Self {
        AppError::Tracker(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

//! Error types for the setup wizard.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SetupError>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing prerequisite artifact: {0}")]
    MissingArtifact(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

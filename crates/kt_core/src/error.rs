//! Error types for the core module.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur during lifecycle actions.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Terraform client failed: {0}")]
    Execution(#[from] kt_runner::RunnerError),

    #[error("Command error: {0}")]
    Command(#[from] kt_command::CommandError),

    #[error("Terraform v{version} is not supported; supported versions are {requirement}")]
    UnsupportedVersion { version: String, requirement: String },

    #[error("Failed to parse Terraform outputs: {0}")]
    OutputsParse(String),

    #[error("State key not found: {0}")]
    StateKeyMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

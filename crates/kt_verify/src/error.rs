//! Error types for verification.

use thiserror::Error;

/// Result type alias for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur while verifying systems.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Verifying the {system} system failed: {message}")]
    SystemFailed { system: String, message: String },

    /// Failures of several systems, joined by blank lines.
    #[error("{0}")]
    Aggregate(String),

    #[error("The {system} system requires the undefined Terraform output {output}")]
    MissingOutput { system: String, output: String },

    #[error("The {output} output used for the {system} system hosts must be a string or a list of strings")]
    InvalidHosts { system: String, output: String },

    #[error("Invalid verifier configuration: {0}")]
    Config(String),

    #[error("InSpec failed: {0}")]
    Runner(#[from] kt_runner::RunnerError),

    #[error(transparent)]
    Core(#[from] kt_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

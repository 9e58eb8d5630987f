//! Error types for command construction.

use thiserror::Error;

/// Result type alias for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while building commands or reading versions.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unable to parse the Terraform client version from output: {0}")]
    UnparseableVersion(String),

    #[error("Invalid version requirement `{requirement}`: {message}")]
    InvalidRequirement { requirement: String, message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

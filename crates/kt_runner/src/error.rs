//! Error types for the runner module.

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Failure of a client command. Every variant carries the command text.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Invalid command `{command}`: {message}")]
    InvalidCommand { command: String, message: String },

    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {seconds} seconds")]
    Timeout { command: String, seconds: u64 },

    #[error("`{command}` exited with code {code}: {output}")]
    NonZeroExit {
        command: String,
        code: i32,
        output: String,
    },

    #[error("IO error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// The command text that failed.
    pub fn command(&self) -> &str {
        match self {
            Self::InvalidCommand { command, .. }
            | Self::Spawn { command, .. }
            | Self::Timeout { command, .. }
            | Self::NonZeroExit { command, .. }
            | Self::Io { command, .. } => command,
        }
    }

    /// The underlying failure detail: the OS error, the timeout, or the
    /// captured output of a nonzero exit.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCommand { message, .. } => message.clone(),
            Self::Spawn { source, .. } | Self::Io { source, .. } => source.to_string(),
            Self::Timeout { seconds, .. } => format!("timed out after {} seconds", seconds),
            Self::NonZeroExit { output, .. } => output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_command_text() {
        let error = RunnerError::NonZeroExit {
            command: "terraform workspace new test".to_string(),
            code: 1,
            output: "Workspace \"test\" already exists".to_string(),
        };

        assert_eq!(error.command(), "terraform workspace new test");
        assert!(error.message().contains("already exists"));
        assert!(error.to_string().contains("exited with code 1"));
    }

    #[test]
    fn test_timeout_message() {
        let error = RunnerError::Timeout {
            command: "terraform apply".to_string(),
            seconds: 5,
        };

        assert_eq!(error.message(), "timed out after 5 seconds");
    }
}

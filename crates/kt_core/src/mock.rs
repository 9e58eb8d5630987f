//! Mock connection for testing.
//!
//! Provides a scripted implementation of the [`Connection`] trait so the
//! lifecycle actions can be exercised without a Terraform client.

use std::sync::Arc;

use async_trait::async_trait;
use kt_command::Command;
use kt_runner::{RunnerError, RunnerResult};
use parking_lot::RwLock;

use crate::connection::Connection;

/// Predefined response for commands starting with a given prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Command succeeds with this stdout
    Success(String),
    /// Command exits nonzero with this output
    Failure(String),
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::Success(stdout.into())
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self::Failure(output.into())
    }
}

/// Mock connection for testing.
///
/// Every executed command is recorded in order. Responses are matched by
/// prefix against the rendered command in registration order; commands with
/// no matching response succeed with empty output.
#[derive(Clone, Default)]
pub struct MockConnection {
    /// Prefix-matched responses.
    responses: Arc<RwLock<Vec<(String, MockResponse)>>>,
    /// Rendered commands, in execution order.
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to commands starting with `prefix`.
    pub fn respond(self, prefix: impl Into<String>, response: MockResponse) -> Self {
        self.responses.write().push((prefix.into(), response));
        self
    }

    /// Answer `version` with the given client version.
    pub fn with_version(self, version: &str) -> Self {
        self.respond("version", MockResponse::success(format!("Terraform v{}\n", version)))
    }

    /// Get all executed commands.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.read().clone()
    }

    /// Get the number of commands executed.
    pub fn call_count(&self) -> usize {
        self.calls.read().len()
    }

    /// Check if a command starting with `prefix` was executed.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls.read().iter().any(|c| c.starts_with(prefix))
    }

    /// Clear all recorded commands.
    pub fn clear_calls(&self) {
        self.calls.write().clear();
    }

    fn response_for(&self, rendered: &str) -> MockResponse {
        self.responses
            .read()
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| MockResponse::success(""))
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn execute(&self, command: &Command) -> RunnerResult<String> {
        let rendered = command.to_string();
        self.calls.write().push(rendered.clone());

        match self.response_for(&rendered) {
            MockResponse::Success(stdout) => Ok(stdout),
            MockResponse::Failure(output) => Err(RunnerError::NonZeroExit {
                command: format!("terraform {}", rendered),
                code: 1,
                output,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_and_matches_prefixes() {
        let connection = MockConnection::new()
            .respond("workspace new", MockResponse::failure("already exists"))
            .with_version("1.0.0");

        let banner = connection.execute(&Command::version()).await.unwrap();
        let failure = connection.execute(&Command::workspace_new("test")).await;
        let other = connection.execute(&Command::get_update()).await.unwrap();

        assert_eq!(banner, "Terraform v1.0.0\n");
        assert!(failure.is_err());
        assert_eq!(other, "");
        assert_eq!(
            connection.get_calls(),
            vec!["version", "workspace new test", "get -update"]
        );
        assert!(connection.was_called("workspace new"));

        connection.clear_calls();
        assert_eq!(connection.call_count(), 0);
    }
}

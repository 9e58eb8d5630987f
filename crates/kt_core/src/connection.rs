//! Connection to the Terraform client.

use async_trait::async_trait;
use kt_command::Command;
use kt_runner::{CommandExecutor, LogHandler, RunConfig, RunnerResult};

use crate::config::DriverConfig;

/// Executes Terraform commands and returns their standard output.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn execute(&self, command: &Command) -> RunnerResult<String>;
}

/// Connection that spawns the configured client in the root module directory.
#[derive(Debug, Clone)]
pub struct ClientConnection {
    executor: CommandExecutor,
    run_config: RunConfig,
}

impl ClientConnection {
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            executor: CommandExecutor::terraform(config.client.clone()),
            run_config: RunConfig::new(&config.root_module_directory)
                .timeout(config.command_timeout),
        }
    }

    /// Set a log handler for streamed client output.
    pub fn with_log_handler(mut self, handler: LogHandler) -> Self {
        self.executor = self.executor.with_log_handler(handler);
        self
    }

    /// Add an environment variable for every command.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.run_config = self.run_config.env(key, value);
        self
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }
}

#[async_trait]
impl Connection for ClientConnection {
    async fn execute(&self, command: &Command) -> RunnerResult<String> {
        self.executor
            .execute(&command.to_string(), &self.run_config)
            .await
    }
}

//! Per-run execution settings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Working directory, timeout and environment for one command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory the client runs in
    pub directory: PathBuf,
    /// Timeout in seconds (0 = no timeout)
    pub timeout_seconds: u64,
    /// Environment variables merged over the executor's environment
    pub env: BTreeMap<String, String>,
    /// Whether to emit each output line as it is produced
    pub stream_logs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            timeout_seconds: 600, // 10 minutes
            env: BTreeMap::new(),
            stream_logs: true,
        }
    }
}

impl RunConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Enable or disable log streaming.
    pub fn stream_logs(mut self, enabled: bool) -> Self {
        self.stream_logs = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new("/srv/infra")
            .timeout(30)
            .env("TF_LOG", "DEBUG")
            .stream_logs(false);

        assert_eq!(config.directory, PathBuf::from("/srv/infra"));
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.env.get("TF_LOG"), Some(&"DEBUG".to_string()));
        assert!(!config.stream_logs);
    }
}

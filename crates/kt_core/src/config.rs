//! Driver configuration.
//!
//! Parsed once from YAML. Every option except `workspace_name` has a
//! default; a missing `workspace_name` fails parsing with an error naming
//! the key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use kt_command::{InitFlags, RunFlags, ValidateFlags};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::variables::Variables;

/// Options controlling how the Terraform client is driven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Path or name of the Terraform client
    #[serde(default = "default_client")]
    pub client: String,
    /// Colored client output
    #[serde(default = "default_true")]
    pub color: bool,
    /// State locking
    #[serde(default = "default_true")]
    pub lock: bool,
    /// Seconds to wait for a state lock
    #[serde(default)]
    pub lock_timeout: u64,
    /// Concurrent resource operations during apply and destroy
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Values for root module variables
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Paths of variable definition files
    #[serde(default)]
    pub variable_files: Vec<String>,
    /// Partial backend configuration passed to init
    #[serde(default)]
    pub backend_configurations: BTreeMap<String, String>,
    /// Directory holding provider plugins
    #[serde(default)]
    pub plugin_directory: Option<String>,
    /// Upgrade modules and plugins during init
    #[serde(default)]
    pub upgrade_during_init: bool,
    /// Directory containing the root module
    #[serde(default = "default_root_module_directory")]
    pub root_module_directory: PathBuf,
    /// Seconds a single client command may run
    #[serde(default = "default_command_timeout")]
    pub command_timeout: u64,
    /// Workspace isolating the test state
    pub workspace_name: String,
    /// Fail on unsupported client versions instead of warning
    #[serde(default = "default_true")]
    pub verify_version: bool,
}

fn default_client() -> String {
    "terraform".to_string()
}

fn default_true() -> bool {
    true
}

fn default_parallelism() -> u32 {
    10
}

fn default_root_module_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_command_timeout() -> u64 {
    600
}

impl DriverConfig {
    /// Create a configuration with defaults for every optional key.
    pub fn new(workspace_name: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            color: true,
            lock: true,
            lock_timeout: 0,
            parallelism: default_parallelism(),
            variables: BTreeMap::new(),
            variable_files: Vec::new(),
            backend_configurations: BTreeMap::new(),
            plugin_directory: None,
            upgrade_during_init: false,
            root_module_directory: default_root_module_directory(),
            command_timeout: default_command_timeout(),
            workspace_name: workspace_name.into(),
            verify_version: true,
        }
    }

    /// Parse and check a YAML document.
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Reject values the client would refuse.
    pub fn check(&self) -> CoreResult<()> {
        if self.workspace_name.trim().is_empty() {
            return Err(CoreError::Config("workspace_name must not be empty".to_string()));
        }
        if self.client.trim().is_empty() {
            return Err(CoreError::Config("client must not be empty".to_string()));
        }
        if self.parallelism == 0 {
            return Err(CoreError::Config("parallelism must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_root_module_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root_module_directory = dir.into();
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_variable_file(mut self, path: impl Into<String>) -> Self {
        self.variable_files.push(path.into());
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn with_verify_version(mut self, enabled: bool) -> Self {
        self.verify_version = enabled;
        self
    }

    pub fn init_flags(&self) -> InitFlags {
        InitFlags::new()
            .color(self.color)
            .lock(self.lock)
            .lock_timeout(self.lock_timeout)
            .upgrade(self.upgrade_during_init)
            .backend_configurations(self.backend_configurations.clone())
            .plugin_directory(self.plugin_directory.clone())
    }

    pub fn validate_flags(&self) -> ValidateFlags {
        ValidateFlags::new()
            .color(self.color)
            .variables(self.variables.clone())
            .variable_files(self.variable_files.clone())
    }

    pub fn run_flags(&self) -> RunFlags {
        RunFlags::new()
            .color(self.color)
            .lock(self.lock)
            .lock_timeout(self.lock_timeout)
            .parallelism(self.parallelism)
            .variables(self.variables.clone())
            .variable_files(self.variable_files.clone())
    }

    /// Snapshot of the configured variables for the state store.
    pub fn variables_snapshot(&self) -> Variables {
        self.variables.clone()
    }
}

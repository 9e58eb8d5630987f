//! CLI command definitions.
//!
//! Each subcommand maps to one action on the test instance described by the
//! kitchen configuration file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use kt_core::{ClientConnection, Connection, DriverConfig, FileStateStore};
use kt_verify::VerifierConfig;

pub mod converge;
pub mod create;
pub mod destroy;
pub mod plan;
pub mod test;
pub mod verify;

/// kitchen-terraform - Terraform lifecycle orchestration with InSpec verification
#[derive(Parser)]
#[command(name = "kt")]
#[command(version, about = "kitchen-terraform - test Terraform modules with InSpec")]
#[command(long_about = r#"
kitchen-terraform drives the Terraform client through the lifecycle of a test
instance and verifies the provisioned systems with InSpec.

ACTIONS:
  create    → init the root module and create the test workspace
  converge  → apply the root module and save its outputs and variables
  plan      → show the changes converge would make
  verify    → run InSpec controls against every configured system
  destroy   → destroy the resources and delete the test workspace
  test      → create, converge, verify, then destroy

EXIT CODES:
  0 - Success
  1 - General error
  2 - Configuration error
  3 - Verification failure
  4 - Terraform client failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the root module and create the test workspace
    Create(create::CreateArgs),

    /// Apply the root module and save outputs and variables
    Converge(converge::ConvergeArgs),

    /// Show the execution plan for the root module
    Plan(plan::PlanArgs),

    /// Verify the configured systems with InSpec
    Verify(verify::VerifyArgs),

    /// Destroy the resources and delete the test workspace
    Destroy(destroy::DestroyArgs),

    /// Run create, converge, verify and destroy in sequence
    Test(test::TestArgs),
}

/// Options shared by every action.
#[derive(Args, Debug, Clone)]
pub struct KitchenArgs {
    /// Kitchen configuration file
    #[arg(short, long, env = "KT_CONFIG", default_value = "kitchen.yml")]
    pub config: PathBuf,

    /// File holding the saved outputs and variables
    #[arg(short, long, default_value = ".kitchen/state.json")]
    pub state: PathBuf,
}

/// Layout of the kitchen configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct KitchenFile {
    pub driver: DriverConfig,
    #[serde(default)]
    pub verifier: Option<VerifierConfig>,
}

impl KitchenFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: Self = serde_yaml::from_str(yaml)?;
        file.driver.check()?;
        if let Some(verifier) = &file.verifier {
            verifier.check()?;
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }
}

/// A loaded configuration with its state file.
pub struct Kitchen {
    pub driver: Arc<DriverConfig>,
    pub verifier: Option<VerifierConfig>,
    pub state_path: PathBuf,
}

impl Kitchen {
    pub fn load(args: &KitchenArgs) -> Result<Self> {
        let file = KitchenFile::load(&args.config)?;
        Ok(Self {
            driver: Arc::new(file.driver),
            verifier: file.verifier,
            state_path: args.state.clone(),
        })
    }

    pub fn connection(&self) -> Arc<dyn Connection> {
        Arc::new(ClientConnection::new(&self.driver))
    }

    pub fn store(&self) -> Arc<FileStateStore> {
        Arc::new(FileStateStore::new(&self.state_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KITCHEN: &str = r#"
driver:
  workspace_name: kitchen-terraform-default
  root_module_directory: test/fixtures/default
  variables:
    region: eu-west-1
verifier:
  fail_fast: false
  systems:
    - name: local
      backend: local
"#;

    #[test]
    fn test_parse_kitchen_file() {
        let file = KitchenFile::from_yaml(KITCHEN).unwrap();

        assert_eq!(file.driver.workspace_name, "kitchen-terraform-default");
        assert_eq!(file.driver.parallelism, 10);
        assert_eq!(file.verifier.as_ref().map(|v| v.fail_fast), Some(false));
    }

    #[test]
    fn test_missing_workspace_name_is_named() {
        let error = KitchenFile::from_yaml("driver:\n  client: terraform\n").unwrap_err();
        assert!(format!("{:#}", error).contains("workspace_name"));
    }

    #[test]
    fn test_verifier_section_is_optional() {
        let file = KitchenFile::from_yaml("driver:\n  workspace_name: ws\n").unwrap();
        assert!(file.verifier.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config.write_all(KITCHEN.as_bytes()).unwrap();

        let kitchen = Kitchen::load(&KitchenArgs {
            config: config.path().to_path_buf(),
            state: PathBuf::from(".kitchen/state.json"),
        })
        .unwrap();

        assert_eq!(
            kitchen.driver.root_module_directory,
            PathBuf::from("test/fixtures/default")
        );
        assert_eq!(kitchen.store().path(), Path::new(".kitchen/state.json"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let args = KitchenArgs {
            config: PathBuf::from("/nonexistent/kitchen.yml"),
            state: PathBuf::from("state.json"),
        };
        assert!(Kitchen::load(&args).is_err());
    }
}

//! InSpec execution seam.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use kt_runner::{CommandExecutor, RunConfig};
use serde_json::Value;
use tracing::debug;

use crate::config::VerifierConfig;
use crate::error::VerifyResult;

/// Everything needed for one InSpec run against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct InspecOptions {
    pub profile_locations: Vec<String>,
    /// Target URI such as `ssh://ubuntu@10.0.0.5:22`
    pub target: String,
    pub controls: Vec<String>,
    pub inputs: BTreeMap<String, Value>,
    pub key_files: Vec<String>,
    pub reporter: Vec<String>,
    pub sudo: bool,
    pub color: bool,
}

/// Runs InSpec controls for a system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InspecRunner: Send + Sync {
    async fn exec(&self, system: &str, options: &InspecOptions) -> VerifyResult<()>;
}

/// Runs the InSpec command line client.
#[derive(Debug, Clone)]
pub struct InspecCli {
    executor: CommandExecutor,
    run_config: RunConfig,
}

impl InspecCli {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            executor: CommandExecutor::new(config.client.clone()),
            run_config: RunConfig::new(".").timeout(config.command_timeout),
        }
    }

    /// Render the `inspec` arguments for `options`, reading inputs from
    /// `input_file`.
    pub fn command_text(options: &InspecOptions, input_file: &Path) -> String {
        let mut args = vec!["exec".to_string()];
        args.extend(options.profile_locations.iter().map(|p| quote(p)));
        args.push(format!("--target={}", quote(&options.target)));

        if !options.controls.is_empty() {
            args.push("--controls".to_string());
            args.extend(options.controls.iter().map(|c| quote(c)));
        }
        if !options.key_files.is_empty() {
            args.push("--key-files".to_string());
            args.extend(options.key_files.iter().map(|k| quote(k)));
        }
        if options.sudo {
            args.push("--sudo".to_string());
        }

        args.push(format!(
            "--input-file={}",
            quote(&input_file.to_string_lossy())
        ));
        if !options.reporter.is_empty() {
            args.push("--reporter".to_string());
            args.extend(options.reporter.iter().map(|r| quote(r)));
        }
        if !options.color {
            args.push("--no-color".to_string());
        }
        args.push("--chef-license=accept-silent".to_string());

        args.join(" ")
    }
}

fn quote(value: &str) -> String {
    shell_words::quote(value).into_owned()
}

#[async_trait]
impl InspecRunner for InspecCli {
    async fn exec(&self, system: &str, options: &InspecOptions) -> VerifyResult<()> {
        let mut input_file = tempfile::Builder::new()
            .prefix("kt-inputs-")
            .suffix(".yml")
            .tempfile()?;
        input_file.write_all(serde_yaml::to_string(&options.inputs)?.as_bytes())?;
        input_file.flush()?;

        let command_text = Self::command_text(options, input_file.path());
        debug!("Running InSpec for the {} system: {}", system, command_text);

        self.executor.execute(&command_text, &self.run_config).await?;
        Ok(())
    }
}

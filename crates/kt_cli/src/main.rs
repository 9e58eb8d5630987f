//! kitchen-terraform CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Configuration error
//! - 3: Verification failure
//! - 4: Terraform client failure

use std::process::ExitCode;

use clap::Parser;
use kt_core::CoreError;
use kt_runner::RunnerError;
use kt_verify::VerifyError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const VERIFICATION_FAILURE: u8 = 3;
    pub const CLIENT_FAILURE: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kt={},warn", level)));

    // Logging may already be initialized by an embedding host
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(args).await,
        Commands::Converge(args) => commands::converge::execute(args).await,
        Commands::Plan(args) => commands::plan::execute(args).await,
        Commands::Verify(args) => commands::verify::execute(args).await,
        Commands::Destroy(args) => commands::destroy::execute(args).await,
        Commands::Test(args) => commands::test::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(error) = cause.downcast_ref::<VerifyError>() {
            return match error {
                VerifyError::SystemFailed { .. } | VerifyError::Aggregate(_) => {
                    ExitCodes::VERIFICATION_FAILURE
                }
                VerifyError::Config(_) | VerifyError::Yaml(_) => ExitCodes::CONFIG_ERROR,
                VerifyError::Runner(_) => ExitCodes::CLIENT_FAILURE,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if let Some(error) = cause.downcast_ref::<CoreError>() {
            return match error {
                CoreError::Config(_) | CoreError::Yaml(_) => ExitCodes::CONFIG_ERROR,
                CoreError::Execution(_) | CoreError::UnsupportedVersion { .. } => {
                    ExitCodes::CLIENT_FAILURE
                }
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if cause.is::<RunnerError>() {
            return ExitCodes::CLIENT_FAILURE;
        }
        if cause.is::<serde_yaml::Error>() {
            return ExitCodes::CONFIG_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_error() {
        let verification = anyhow::Error::new(VerifyError::Aggregate("a\n\nb".to_string()));
        let config = anyhow::Error::new(CoreError::Config("bad".to_string()))
            .context("Failed to load kitchen.yml");
        let client = anyhow::Error::new(CoreError::Execution(RunnerError::Timeout {
            command: "terraform apply".to_string(),
            seconds: 1,
        }));
        let other: anyhow::Result<()> = Err(anyhow::anyhow!("boom")).context("outer");

        assert_eq!(categorize_error(&verification), ExitCodes::VERIFICATION_FAILURE);
        assert_eq!(categorize_error(&config), ExitCodes::CONFIG_ERROR);
        assert_eq!(categorize_error(&client), ExitCodes::CLIENT_FAILURE);
        assert_eq!(categorize_error(&other.unwrap_err()), ExitCodes::GENERAL_ERROR);
    }
}

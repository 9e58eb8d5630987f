//! # kt_runner
//!
//! Client process execution for kitchen-terraform.
//!
//! This crate spawns command line clients (Terraform, InSpec) in a working
//! directory, streams their output as it is produced, and turns nonzero
//! exits, spawn errors and timeouts into a single [`RunnerError`] type that
//! carries the failing command text.
//!
//! # Example
//!
//! ```rust,no_run
//! use kt_runner::{CommandExecutor, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = CommandExecutor::terraform("terraform");
//!     let config = RunConfig::new("./infrastructure").timeout(600);
//!
//!     let banner = executor.execute("version", &config).await?;
//!     println!("{}", banner);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod executor;

pub use config::RunConfig;
pub use error::{RunnerError, RunnerResult};
pub use executor::{CommandExecutor, LogHandler, LogLine, LogStream};

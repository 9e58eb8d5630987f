//! # kt_core
//!
//! Terraform lifecycle orchestration for kitchen-terraform.
//!
//! This crate sequences Terraform client invocations for the create,
//! converge, plan and destroy actions of a test instance, and persists the
//! resulting outputs and variables so the verifier can read them later.
//!
//! # Architecture
//!
//! - **Connection**: executes a rendered [`kt_command::Command`] and returns stdout
//! - **Lifecycle**: [`Create`], [`Converge`], [`Plan`] and [`Destroy`] actions
//! - **Version verification**: strict or permissive handling of unsupported clients
//! - **State**: outputs and variables snapshots behind the [`StateStore`] trait
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kt_core::{ClientConnection, Converge, DriverConfig, FileStateStore};
//!
//! let config = Arc::new(DriverConfig::from_yaml("workspace_name: kitchen-terraform-default")?);
//! let connection = Arc::new(ClientConnection::new(&config));
//! let store = Arc::new(FileStateStore::new(".kitchen/default.json"));
//!
//! let outputs = Converge::new(config, connection, store)?.call().await?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod outputs;
pub mod state;
pub mod variables;
pub mod version_verifier;

pub use config::DriverConfig;
pub use connection::{ClientConnection, Connection};
pub use error::{CoreError, CoreResult};
pub use lifecycle::{Converge, Create, Destroy, Plan};
pub use mock::{MockConnection, MockResponse};
pub use outputs::{no_outputs_defined, Output, Outputs, OutputsManager};
pub use state::{FileStateStore, MemoryStateStore, StateStore, OUTPUTS_KEY, VARIABLES_KEY};
pub use variables::{Variables, VariablesManager};
pub use version_verifier::{VersionStrategy, VersionVerifier};

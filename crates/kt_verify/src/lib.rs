//! # kt_verify
//!
//! Systems verification for kitchen-terraform.
//!
//! A *system* is a named InSpec target: a backend, optional hosts, the
//! controls to run and the Terraform outputs to expose as inputs. The
//! [`Verifier`] loads the outputs and variables saved by converge and runs
//! every configured system, either stopping at the first failure
//! ([`SystemsVerifier::FailFast`]) or reporting all failures together
//! ([`SystemsVerifier::FailSlow`]).
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kt_core::FileStateStore;
//! use kt_verify::{InspecCli, Verifier, VerifierConfig};
//!
//! let config = VerifierConfig::from_yaml(yaml)?;
//! let runner = Arc::new(InspecCli::new(&config));
//! let store = Arc::new(FileStateStore::new(".kitchen/default.json"));
//!
//! Verifier::new(config, runner, store)?.call().await?;
//! ```

pub mod config;
pub mod error;
pub mod inspec;
pub mod strategy;
pub mod system;
pub mod verifier;

pub use config::{SystemConfig, VerifierConfig};
pub use error::{VerifyError, VerifyResult};
pub use inspec::{InspecCli, InspecOptions, InspecRunner};
pub use strategy::SystemsVerifier;
pub use system::System;
pub use verifier::Verifier;

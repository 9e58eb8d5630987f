//! Plan action: preview the changes a converge would make.

use std::sync::Arc;

use tracing::info;

use super::Steps;
use crate::config::DriverConfig;
use crate::connection::Connection;
use crate::error::CoreResult;
use crate::version_verifier::{VersionStrategy, VersionVerifier};

/// Runs `plan` in the test workspace after initializing the directory,
/// downloading modules and validating the configuration. Nothing is saved to state.
pub struct Plan {
    config: Arc<DriverConfig>,
    connection: Arc<dyn Connection>,
    verifier: VersionVerifier,
}

impl Plan {
    pub fn new(config: Arc<DriverConfig>, connection: Arc<dyn Connection>) -> CoreResult<Self> {
        let verifier =
            VersionVerifier::supported(VersionStrategy::from_verify_version(config.verify_version))?;
        Ok(Self {
            config,
            connection,
            verifier,
        })
    }

    /// Replace the version verifier.
    pub fn with_version_verifier(mut self, verifier: VersionVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Run the action and return the plan text.
    pub async fn call(&self) -> CoreResult<String> {
        info!("Planning {}.", self.config.workspace_name);
        let steps = Steps::new(&self.config, self.connection.as_ref(), &self.verifier);

        let factory = steps.prepare().await?;
        steps.initialize_directory(&factory).await?;
        steps.select_workspace(&self.config.workspace_name).await?;
        steps.download_modules().await?;
        steps.validate_files(&factory).await?;
        let plan = steps.plan().await?;

        info!("Finished planning {}.", self.config.workspace_name);
        Ok(plan)
    }
}

//! Create action: prepare the working directory and the test workspace.

use std::sync::Arc;

use tracing::info;

use super::Steps;
use crate::config::DriverConfig;
use crate::connection::Connection;
use crate::error::CoreResult;
use crate::version_verifier::{VersionStrategy, VersionVerifier};

/// Reads and verifies the client version, initializes the root module and
/// creates (or selects) the test workspace.
pub struct Create {
    config: Arc<DriverConfig>,
    connection: Arc<dyn Connection>,
    verifier: VersionVerifier,
}

impl Create {
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

    pub async fn call(&self) -> CoreResult<()> {
        info!("Creating {}.", self.config.workspace_name);
        let steps = Steps::new(&self.config, self.connection.as_ref(), &self.verifier);

        let factory = steps.prepare().await?;
        steps.initialize_directory(&factory).await?;
        steps.create_or_select_workspace().await?;

        info!("Finished creating {}.", self.config.workspace_name);
        Ok(())
    }
}

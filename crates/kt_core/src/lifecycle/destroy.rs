//! Destroy action: tear down the infrastructure and the test workspace.

use std::sync::Arc;

use tracing::info;

use super::Steps;
use crate::config::DriverConfig;
use crate::connection::Connection;
use crate::error::CoreResult;
use crate::version_verifier::{VersionStrategy, VersionVerifier};

/// Destroys the infrastructure in the test workspace, then switches to the
/// default workspace and deletes the test workspace. The client refuses to
/// delete the selected workspace, so the switch always comes first.
pub struct Destroy {
    config: Arc<DriverConfig>,
    connection: Arc<dyn Connection>,
    verifier: VersionVerifier,
}

impl Destroy {
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
        info!("Destroying {}.", self.config.workspace_name);
        let steps = Steps::new(&self.config, self.connection.as_ref(), &self.verifier);

        let factory = steps.prepare().await?;
        steps.initialize_directory(&factory).await?;
        steps.select_or_create_workspace().await?;
        steps.destroy().await?;
        steps.select_default_workspace().await?;
        steps.delete_workspace().await?;

        info!("Finished destroying {}.", self.config.workspace_name);
        Ok(())
    }
}

//! Converge action: apply the root module and record its results.

use std::sync::Arc;

use tracing::info;

use super::Steps;
use crate::config::DriverConfig;
use crate::connection::Connection;
use crate::error::CoreResult;
use crate::outputs::{Outputs, OutputsManager};
use crate::state::StateStore;
use crate::variables::VariablesManager;
use crate::version_verifier::{VersionStrategy, VersionVerifier};

/// Re-initializes the root module, applies it in the test workspace, then saves the variables
/// and outputs snapshots to the state store.
pub struct Converge {
    config: Arc<DriverConfig>,
    connection: Arc<dyn Connection>,
    store: Arc<dyn StateStore>,
    verifier: VersionVerifier,
}

impl Converge {
    pub fn new(
        config: Arc<DriverConfig>,
        connection: Arc<dyn Connection>,
        store: Arc<dyn StateStore>,
    ) -> CoreResult<Self> {
        let verifier =
            VersionVerifier::supported(VersionStrategy::from_verify_version(config.verify_version))?;
        Ok(Self {
            config,
            connection,
            store,
            verifier,
        })
    }

    /// Replace the version verifier.
    pub fn with_version_verifier(mut self, verifier: VersionVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Run the action and return the outputs snapshot that was saved.
    pub async fn call(&self) -> CoreResult<Outputs> {
        info!("Converging {}.", self.config.workspace_name);
        let steps = Steps::new(&self.config, self.connection.as_ref(), &self.verifier);

        let factory = steps.prepare().await?;
        steps.initialize_directory(&factory).await?;
        steps.select_workspace(&self.config.workspace_name).await?;
        steps.download_modules().await?;
        steps.validate_files(&factory).await?;
        steps.apply().await?;
        let outputs = OutputsManager::retrieve(steps.connection()).await?;

        info!("Started saving the Terraform variables and outputs.");
        VariablesManager::save(self.store.as_ref(), &self.config.variables_snapshot())?;
        OutputsManager::save(self.store.as_ref(), &outputs)?;
        info!("Finished saving the Terraform variables and outputs.");

        info!("Finished converging {}.", self.config.workspace_name);
        Ok(outputs)
    }
}

//! The verify action.

use std::sync::Arc;

use kt_core::{OutputsManager, StateStore, VariablesManager};
use tracing::info;

use crate::config::VerifierConfig;
use crate::error::VerifyResult;
use crate::inspec::InspecRunner;
use crate::strategy::SystemsVerifier;
use crate::system::System;

/// Verifies every configured system against the saved outputs and variables.
pub struct Verifier {
    systems: Vec<System>,
    strategy: SystemsVerifier,
    store: Arc<dyn StateStore>,
}

impl Verifier {
    pub fn new(
        config: VerifierConfig,
        runner: Arc<dyn InspecRunner>,
        store: Arc<dyn StateStore>,
    ) -> VerifyResult<Self> {
        config.check()?;

        let systems = config
            .systems
            .iter()
            .map(|system| System::new(system.clone(), runner.clone()).with_color(config.color))
            .collect();

        Ok(Self {
            systems,
            strategy: SystemsVerifier::from_fail_fast(config.fail_fast),
            store,
        })
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn strategy(&self) -> SystemsVerifier {
        self.strategy
    }

    pub async fn call(&self) -> VerifyResult<()> {
        info!("Started verifying {} systems.", self.systems.len());

        let outputs = OutputsManager::load(self.store.as_ref())?;
        let variables = VariablesManager::load(self.store.as_ref())?;

        self.strategy
            .verify(&self.systems, &outputs, &variables)
            .await?;

        info!("Finished verifying the systems.");
        Ok(())
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("systems", &self.systems)
            .field("strategy", &self.strategy)
            .finish()
    }
}

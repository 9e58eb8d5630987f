//! Strategies for verifying several systems.

use kt_core::{Outputs, Variables};
use tracing::{error, info};

use crate::error::{VerifyError, VerifyResult};
use crate::system::System;

/// How failures across systems are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemsVerifier {
    /// Stop at the first failing system.
    FailFast,
    /// Verify every system and report all failures together.
    FailSlow,
}

impl SystemsVerifier {
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            Self::FailFast
        } else {
            Self::FailSlow
        }
    }

    pub async fn verify(
        &self,
        systems: &[System],
        outputs: &Outputs,
        variables: &Variables,
    ) -> VerifyResult<()> {
        match self {
            Self::FailFast => {
                for system in systems {
                    if let Err(e) = system.verify(outputs, variables).await {
                        error!("{}", e);
                        return Err(e);
                    }
                }
                Ok(())
            }
            Self::FailSlow => {
                let mut failures = Vec::new();
                for system in systems {
                    if let Err(e) = system.verify(outputs, variables).await {
                        error!("{}", e);
                        failures.push(e.to_string());
                    }
                }

                if failures.is_empty() {
                    Ok(())
                } else {
                    info!("{} of {} systems failed.", failures.len(), systems.len());
                    Err(VerifyError::Aggregate(failures.join("\n\n")))
                }
            }
        }
    }
}

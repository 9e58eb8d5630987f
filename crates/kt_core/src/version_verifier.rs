//! Client version verification.

use kt_command::{ClientVersion, VersionRequirement};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};

/// What to do when the client version is outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStrategy {
    /// Abort the action
    Strict,
    /// Warn and continue
    Permissive,
}

impl VersionStrategy {
    /// Strategy selected by the `verify_version` option.
    pub fn from_verify_version(verify_version: bool) -> Self {
        if verify_version {
            Self::Strict
        } else {
            Self::Permissive
        }
    }

    pub fn call(
        &self,
        version: &ClientVersion,
        requirement: &VersionRequirement,
    ) -> CoreResult<()> {
        match self {
            Self::Strict => Err(CoreError::UnsupportedVersion {
                version: version.to_string(),
                requirement: requirement.to_string(),
            }),
            Self::Permissive => {
                warn!(
                    "Terraform v{} is not supported (supported: {}); continuing because version verification is disabled.",
                    version, requirement
                );
                Ok(())
            }
        }
    }
}

/// Checks a client version against the supported range.
#[derive(Debug, Clone)]
pub struct VersionVerifier {
    requirement: VersionRequirement,
    strategy: VersionStrategy,
}

impl VersionVerifier {
    pub fn new(requirement: VersionRequirement, strategy: VersionStrategy) -> Self {
        Self {
            requirement,
            strategy,
        }
    }

    /// Verifier for the range supported by this release.
    pub fn supported(strategy: VersionStrategy) -> CoreResult<Self> {
        Ok(Self::new(VersionRequirement::supported()?, strategy))
    }

    pub fn strategy(&self) -> VersionStrategy {
        self.strategy
    }

    pub fn verify(&self, version: &ClientVersion) -> CoreResult<()> {
        info!("Started verifying the Terraform client version.");
        if self.requirement.matches(version) {
            info!("Terraform v{} is supported.", version);
        } else {
            self.strategy.call(version, &self.requirement)?;
        }
        info!("Finished verifying the Terraform client version.");
        Ok(())
    }
}

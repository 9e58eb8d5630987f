//! Terraform client version parsing and range checks.

use std::fmt;

use regex::Regex;
use semver::{Version, VersionReq};

use crate::error::{CommandError, CommandResult};

const BANNER_PATTERN: &str = r"v(\d+)\.(\d+)\.(\d+)";

/// Range of client versions the lifecycle actions are known to work with.
pub const SUPPORTED_VERSIONS: &str = ">=0.11.4, <2.0.0";

/// Version of the Terraform client, read from the `version` banner.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientVersion(Version);

impl ClientVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Extract `major.minor.patch` from free-form banner text such as
    /// `Terraform v1.2.3\non linux_amd64`.
    pub fn parse_banner(text: &str) -> CommandResult<Self> {
        let pattern = Regex::new(BANNER_PATTERN)?;
        let captures = pattern
            .captures(text)
            .ok_or_else(|| CommandError::UnparseableVersion(text.trim().to_string()))?;

        let component = |index: usize| -> CommandResult<u64> {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| CommandError::UnparseableVersion(text.trim().to_string()))
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A semver range the client version must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement(VersionReq);

impl VersionRequirement {
    pub fn parse(requirement: &str) -> CommandResult<Self> {
        VersionReq::parse(requirement)
            .map(Self)
            .map_err(|e| CommandError::InvalidRequirement {
                requirement: requirement.to_string(),
                message: e.to_string(),
            })
    }

    /// The range supported by this release.
    pub fn supported() -> CommandResult<Self> {
        Self::parse(SUPPORTED_VERSIONS)
    }

    pub fn matches(&self, version: &ClientVersion) -> bool {
        self.0.matches(version.as_semver())
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

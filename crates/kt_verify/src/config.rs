//! Verifier and system configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};

/// A named InSpec target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub name: String,
    /// InSpec backend, e.g. `ssh`, `local`, `aws`
    pub backend: String,
    /// Static hosts to verify
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Output holding the hosts to verify; takes precedence over `hosts`
    #[serde(default)]
    pub hosts_output: Option<String>,
    /// InSpec input name to Terraform output name
    #[serde(default)]
    pub attrs_outputs: BTreeMap<String, String>,
    /// Controls to run; all controls when empty
    #[serde(default)]
    pub controls: Vec<String>,
    #[serde(default = "default_profile_locations")]
    pub profile_locations: Vec<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub key_files: Vec<String>,
    #[serde(default = "default_reporter")]
    pub reporter: Vec<String>,
    #[serde(default)]
    pub sudo: bool,
}

fn default_profile_locations() -> Vec<String> {
    vec!["test/integration/default".to_string()]
}

fn default_reporter() -> Vec<String> {
    vec!["cli".to_string()]
}

impl SystemConfig {
    pub fn new(name: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backend: backend.into(),
            hosts: Vec::new(),
            hosts_output: None,
            attrs_outputs: BTreeMap::new(),
            controls: Vec::new(),
            profile_locations: default_profile_locations(),
            user: None,
            port: None,
            key_files: Vec::new(),
            reporter: default_reporter(),
            sudo: false,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    pub fn with_hosts_output(mut self, output: impl Into<String>) -> Self {
        self.hosts_output = Some(output.into());
        self
    }

    pub fn with_attr_output(mut self, attr: impl Into<String>, output: impl Into<String>) -> Self {
        self.attrs_outputs.insert(attr.into(), output.into());
        self
    }

    pub fn with_control(mut self, control: impl Into<String>) -> Self {
        self.controls.push(control.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// Verifier options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Systems, verified in this order
    pub systems: Vec<SystemConfig>,
    /// Stop at the first failing system
    #[serde(default = "default_true")]
    pub fail_fast: bool,
    /// Colored InSpec output
    #[serde(default = "default_true")]
    pub color: bool,
    /// Path or name of the InSpec client
    #[serde(default = "default_client")]
    pub client: String,
    /// Seconds a single InSpec run may take
    #[serde(default = "default_command_timeout")]
    pub command_timeout: u64,
}

fn default_true() -> bool {
    true
}

fn default_client() -> String {
    "inspec".to_string()
}

fn default_command_timeout() -> u64 {
    600
}

impl VerifierConfig {
    pub fn new(systems: Vec<SystemConfig>) -> Self {
        Self {
            systems,
            fail_fast: true,
            color: true,
            client: default_client(),
            command_timeout: default_command_timeout(),
        }
    }

    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Require at least one system and unique, non-empty system names.
    pub fn check(&self) -> VerifyResult<()> {
        if self.systems.is_empty() {
            return Err(VerifyError::Config("at least one system is required".to_string()));
        }

        let mut names = BTreeSet::new();
        for system in &self.systems {
            if system.name.trim().is_empty() {
                return Err(VerifyError::Config("system names must not be empty".to_string()));
            }
            if !names.insert(system.name.as_str()) {
                return Err(VerifyError::Config(format!(
                    "duplicate system name: {}",
                    system.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_systems_in_order() {
        let yaml = r#"
fail_fast: false
systems:
  - name: bastion
    backend: ssh
    hosts_output: bastion_ip
    user: ubuntu
    key_files:
      - ~/.ssh/id_ed25519
    controls:
      - ssh_hardening
  - name: cloud
    backend: aws
    attrs_outputs:
      vpc_id: main_vpc_id
"#;
        let config = VerifierConfig::from_yaml(yaml).unwrap();

        assert!(!config.fail_fast);
        assert_eq!(config.systems[0].name, "bastion");
        assert_eq!(config.systems[1].name, "cloud");
        assert_eq!(config.systems[0].hosts_output.as_deref(), Some("bastion_ip"));
        assert_eq!(config.systems[1].reporter, vec!["cli"]);
        assert_eq!(
            config.systems[1].profile_locations,
            vec!["test/integration/default"]
        );
    }

    #[test]
    fn test_requires_systems() {
        assert!(matches!(
            VerifierConfig::from_yaml("systems: []"),
            Err(VerifyError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let config = VerifierConfig::new(vec![
            SystemConfig::new("web", "ssh"),
            SystemConfig::new("web", "local"),
        ]);
        assert!(matches!(config.check(), Err(VerifyError::Config(_))));
    }

    #[test]
    fn test_missing_backend_fails() {
        assert!(VerifierConfig::from_yaml("systems:\n  - name: web").is_err());
    }
}

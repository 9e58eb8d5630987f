//! A single verification target.

use std::collections::BTreeMap;
use std::sync::Arc;

use kt_core::{Outputs, Variables};
use serde_json::Value;
use tracing::info;

use crate::config::SystemConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::inspec::{InspecOptions, InspecRunner};

/// A configured system bound to an InSpec runner.
#[derive(Clone)]
pub struct System {
    config: SystemConfig,
    runner: Arc<dyn InspecRunner>,
    color: bool,
}

impl System {
    pub fn new(config: SystemConfig, runner: Arc<dyn InspecRunner>) -> Self {
        Self {
            config,
            runner,
            color: true,
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Inputs handed to InSpec: `output_<name>` for every output,
    /// `input_<name>` for every variable, and each `attrs_outputs` entry.
    pub fn resolve_inputs(
        &self,
        outputs: &Outputs,
        variables: &Variables,
    ) -> VerifyResult<BTreeMap<String, Value>> {
        let mut inputs = BTreeMap::new();

        for (name, output) in outputs {
            inputs.insert(format!("output_{}", name), output.value.clone());
        }
        for (name, value) in variables {
            inputs.insert(format!("input_{}", name), Value::String(value.clone()));
        }
        for (attr, output_name) in &self.config.attrs_outputs {
            let output = outputs
                .get(output_name)
                .ok_or_else(|| VerifyError::MissingOutput {
                    system: self.config.name.clone(),
                    output: output_name.clone(),
                })?;
            inputs.insert(attr.clone(), output.value.clone());
        }

        Ok(inputs)
    }

    /// Hosts from `hosts_output` when set, otherwise the static `hosts`.
    pub fn resolve_hosts(&self, outputs: &Outputs) -> VerifyResult<Vec<String>> {
        let Some(output_name) = &self.config.hosts_output else {
            return Ok(self.config.hosts.clone());
        };

        let output = outputs
            .get(output_name)
            .ok_or_else(|| VerifyError::MissingOutput {
                system: self.config.name.clone(),
                output: output_name.clone(),
            })?;
        let invalid = || VerifyError::InvalidHosts {
            system: self.config.name.clone(),
            output: output_name.clone(),
        };

        match &output.value {
            Value::String(host) => Ok(vec![host.clone()]),
            Value::Array(values) => values
                .iter()
                .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
                .collect(),
            _ => Err(invalid()),
        }
    }

    /// Target URI for a host, or for the backend itself without one.
    pub fn target(&self, host: Option<&str>) -> String {
        let backend = &self.config.backend;
        match host {
            None => format!("{}://", backend),
            Some(host) => {
                let user = self
                    .config
                    .user
                    .as_ref()
                    .map(|u| format!("{}@", u))
                    .unwrap_or_default();
                let port = self
                    .config
                    .port
                    .map(|p| format!(":{}", p))
                    .unwrap_or_default();
                format!("{}://{}{}{}", backend, user, host, port)
            }
        }
    }

    fn options(&self, target: String, inputs: &BTreeMap<String, Value>) -> InspecOptions {
        InspecOptions {
            profile_locations: self.config.profile_locations.clone(),
            target,
            controls: self.config.controls.clone(),
            inputs: inputs.clone(),
            key_files: self.config.key_files.clone(),
            reporter: self.config.reporter.clone(),
            sudo: self.config.sudo,
            color: self.color,
        }
    }

    /// Run the system's controls against every host.
    pub async fn verify(&self, outputs: &Outputs, variables: &Variables) -> VerifyResult<()> {
        info!("Started verifying the {} system.", self.config.name);

        self.run_controls(outputs, variables)
            .await
            .map_err(|e| VerifyError::SystemFailed {
                system: self.config.name.clone(),
                message: e.to_string(),
            })?;

        info!("Finished verifying the {} system.", self.config.name);
        Ok(())
    }

    async fn run_controls(&self, outputs: &Outputs, variables: &Variables) -> VerifyResult<()> {
        let inputs = self.resolve_inputs(outputs, variables)?;
        let hosts = self.resolve_hosts(outputs)?;

        if hosts.is_empty() || self.config.backend == "local" {
            let options = self.options(self.target(None), &inputs);
            return self.runner.exec(&self.config.name, &options).await;
        }

        for host in &hosts {
            info!("Verifying host {} of the {} system.", host, self.config.name);
            let options = self.options(self.target(Some(host)), &inputs);
            self.runner.exec(&self.config.name, &options).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("config", &self.config)
            .field("color", &self.color)
            .finish()
    }
}

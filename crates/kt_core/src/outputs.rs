//! Terraform outputs retrieval and persistence.

use std::collections::BTreeMap;

use kt_command::Command;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::connection::Connection;
use crate::error::{CoreError, CoreResult};
use crate::state::{load_snapshot, save_snapshot, StateStore, OUTPUTS_KEY};

/// Wording used by clients before 0.12 when the state has no outputs.
const NO_OUTPUTS_PATTERN: &str = r"(?i)no\s+outputs\s+defined";

/// A single output as reported by `output -json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub sensitive: bool,
    /// Type name, or a type expression on newer clients
    #[serde(rename = "type", default)]
    pub output_type: Value,
    pub value: Value,
}

/// Outputs keyed by name.
pub type Outputs = BTreeMap<String, Output>;

/// Whether a client message reports that no outputs are defined.
///
/// This matches the wording of a specific client release rather than a
/// structured error, so it is the single place to change when that wording
/// changes.
pub fn no_outputs_defined(message: &str) -> bool {
    Regex::new(NO_OUTPUTS_PATTERN)
        .map(|pattern| pattern.is_match(message))
        .unwrap_or(false)
}

/// Retrieves, saves and loads the outputs snapshot.
pub struct OutputsManager;

impl OutputsManager {
    /// Parse `output -json` text.
    pub fn parse(json: &str) -> CoreResult<Outputs> {
        serde_json::from_str(json).map_err(|e| CoreError::OutputsParse(e.to_string()))
    }

    /// Run `output -json` and parse the result. A client reporting that no
    /// outputs are defined yields an empty mapping.
    pub async fn retrieve(connection: &dyn Connection) -> CoreResult<Outputs> {
        info!("Started retrieving the Terraform outputs.");

        let outputs = match connection.execute(&Command::output_json()).await {
            Ok(text) => match Self::parse(&text) {
                Ok(outputs) => outputs,
                Err(_) if no_outputs_defined(&text) => Outputs::new(),
                Err(error) => return Err(error),
            },
            Err(error) if no_outputs_defined(&error.message()) => {
                warn!("The Terraform state has no outputs defined.");
                Outputs::new()
            }
            Err(error) => return Err(error.into()),
        };

        info!("Finished retrieving {} Terraform outputs.", outputs.len());
        Ok(outputs)
    }

    pub fn save(store: &dyn StateStore, outputs: &Outputs) -> CoreResult<()> {
        save_snapshot(store, OUTPUTS_KEY, outputs)
    }

    pub fn load(store: &dyn StateStore) -> CoreResult<Outputs> {
        load_snapshot(store, OUTPUTS_KEY)
    }
}

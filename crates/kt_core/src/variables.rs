//! Variables snapshot persistence.

use std::collections::BTreeMap;

use crate::error::CoreResult;
use crate::state::{load_snapshot, save_snapshot, StateStore, VARIABLES_KEY};

/// Root module variables, as configured.
pub type Variables = BTreeMap<String, String>;

/// Saves and loads the variables snapshot.
pub struct VariablesManager;

impl VariablesManager {
    pub fn save(store: &dyn StateStore, variables: &Variables) -> CoreResult<()> {
        save_snapshot(store, VARIABLES_KEY, variables)
    }

    pub fn load(store: &dyn StateStore) -> CoreResult<Variables> {
        load_snapshot(store, VARIABLES_KEY)
    }
}

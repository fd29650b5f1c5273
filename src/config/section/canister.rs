//! `[canister]` section configuration.
//!
//! Where to find the canister id injected into html.
//!
//! # Example
//!
//! ```toml
//! [canister]
//! ids_file = ".dfx/local/canister_ids.json"
//! name = "internet_identity"
//! network = "local"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::canister::{DEFAULT_CANISTER, DEFAULT_IDS_FILE, DEFAULT_NETWORK};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanisterConfig {
    /// dfx canister ids file (relative to project root).
    pub ids_file: PathBuf,
    /// Canister name, the outer key of the ids file.
    pub name: String,
    /// Network name, the inner key of the ids file.
    pub network: String,
}

impl Default for CanisterConfig {
    fn default() -> Self {
        Self {
            ids_file: DEFAULT_IDS_FILE.into(),
            name: DEFAULT_CANISTER.into(),
            network: DEFAULT_NETWORK.into(),
        }
    }
}

impl CanisterConfig {
    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.name.trim().is_empty() {
            errors.push("[canister] name must not be empty".into());
        }
        if self.network.trim().is_empty() {
            errors.push("[canister] network must not be empty".into());
        }
    }
}

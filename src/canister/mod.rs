//! Canister id lookup from dfx's local state.
//!
//! dfx writes the ids of locally deployed canisters to
//! `.dfx/local/canister_ids.json`:
//!
//! ```json
//! { "internet_identity": { "local": "rrkah-fqaaa-aaaaa-aaaaq-cai" } }
//! ```
//!
//! The reader resolves `<canister>.<network>` from that document.

mod fs;

#[cfg(test)]
pub use fs::memory::MemoryFs;
pub use fs::{LocalFs, ReadText};

use std::path::PathBuf;
use std::sync::OnceLock;

use serde_json::Value;

use crate::config::CanisterConfig;
use crate::error::{HookError, HookResult};
use crate::log;

/// Path of the ids file dfx maintains for the local replica.
pub const DEFAULT_IDS_FILE: &str = ".dfx/local/canister_ids.json";
/// Outer key: the canister name.
pub const DEFAULT_CANISTER: &str = "internet_identity";
/// Inner key: the network name.
pub const DEFAULT_NETWORK: &str = "local";

/// Resolves a canister id through a [`ReadText`] capability.
///
/// The first successful read is cached, so one reader hits the ids file
/// at most once. Failures are not cached.
#[derive(Debug, Clone)]
pub struct CanisterIdReader<F = LocalFs> {
    fs: F,
    ids_file: PathBuf,
    canister: String,
    network: String,
    resolved: OnceLock<String>,
}

impl CanisterIdReader<LocalFs> {
    /// Reader over the local filesystem, keyed as configured.
    pub fn from_config(config: &CanisterConfig) -> Self {
        Self::new(
            LocalFs,
            config.ids_file.clone(),
            config.name.clone(),
            config.network.clone(),
        )
    }
}

impl<F: ReadText> CanisterIdReader<F> {
    pub fn new(
        fs: F,
        ids_file: impl Into<PathBuf>,
        canister: impl Into<String>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            ids_file: ids_file.into(),
            canister: canister.into(),
            network: network.into(),
            resolved: OnceLock::new(),
        }
    }

    /// Reader with the default ids file and keys.
    pub fn with_defaults(fs: F) -> Self {
        Self::new(fs, DEFAULT_IDS_FILE, DEFAULT_CANISTER, DEFAULT_NETWORK)
    }

    /// Read the ids file and return the id at `<canister>.<network>`.
    ///
    /// Fails with [`HookError::Configuration`] if the file is missing,
    /// is not JSON, or the value is absent, null, empty or not a string.
    pub fn read(&self) -> HookResult<String> {
        if let Some(id) = self.resolved.get() {
            return Ok(id.clone());
        }
        let id = self.resolve()?;
        Ok(self.resolved.get_or_init(|| id).clone())
    }

    fn resolve(&self) -> HookResult<String> {
        let path = &self.ids_file;
        let content = self
            .fs
            .read_text(path)
            .map_err(|e| HookError::configuration(path, e))?;
        let ids: Value =
            serde_json::from_str(&content).map_err(|e| HookError::configuration(path, e))?;

        let key = format!("{}.{}", self.canister, self.network);
        let value = ids.get(&self.canister).and_then(|c| c.get(&self.network));

        match value {
            Some(Value::String(id)) if !id.is_empty() => {
                log!("canister"; "read canister ID: {}", id);
                Ok(id.clone())
            }
            Some(Value::String(_)) => Err(HookError::configuration(
                path,
                format!("`{key}` is empty"),
            )),
            None | Some(Value::Null) => Err(HookError::configuration(
                path,
                format!("`{key}` is not set"),
            )),
            Some(other) => Err(HookError::configuration(
                path,
                format!("`{key}` is not a string: {other}"),
            )),
        }
    }
}

//! `[html]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [html]
//! inject_canister_id = true
//! minify = true
//! ```

use serde::{Deserialize, Serialize};

/// Which `html-transform` hooks are registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Add `data-canister-id` to the module entry script.
    pub inject_canister_id: bool,
    /// Collapse whitespace.
    pub minify: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            inject_canister_id: true,
            minify: true,
        }
    }
}

//! `html-transform` hooks applied to every emitted html document.
//!
//! Hooks run in registration order; each receives the previous hook's
//! output. The default chain is:
//!
//! ```text
//! html ─► inject canister id ─► minify ─► html
//! ```

mod inject;
mod minify;

use inject::inject_canister_id;
use minify::minify_html;

use crate::canister::{CanisterIdReader, LocalFs, ReadText};
use crate::config::HooksConfig;
use crate::debug;
use crate::error::HookResult;

/// Name every html hook is registered under.
pub const HTML_TRANSFORM: &str = "html-transform";

/// A registered html transform.
#[derive(Debug, Clone)]
pub enum HtmlHook<F = LocalFs> {
    /// Add `data-canister-id` to the module entry script.
    InjectCanisterId(CanisterIdReader<F>),
    /// Collapse redundant whitespace.
    Minify,
}

impl<F: ReadText> HtmlHook<F> {
    pub fn name(&self) -> &'static str {
        HTML_TRANSFORM
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InjectCanisterId(_) => "inject-canister-id",
            Self::Minify => minify::HOOK_NAME,
        }
    }

    pub async fn apply(&self, html: String) -> HookResult<String> {
        match self {
            Self::InjectCanisterId(reader) => inject_canister_id(&html, reader),
            Self::Minify => minify_html(html).await,
        }
    }
}

/// Hooks enabled by `config`, in pipeline order.
pub fn html_hooks(config: &HooksConfig) -> Vec<HtmlHook> {
    let mut hooks = Vec::with_capacity(2);
    if config.html.inject_canister_id {
        hooks.push(HtmlHook::InjectCanisterId(CanisterIdReader::from_config(
            &config.canister,
        )));
    }
    if config.html.minify {
        hooks.push(HtmlHook::Minify);
    }
    hooks
}

/// Run `html` through `hooks` in order, stopping at the first error.
pub async fn transform_html<F: ReadText>(hooks: &[HtmlHook<F>], html: String) -> HookResult<String> {
    let mut html = html;
    for hook in hooks {
        debug!("html"; "{} `{}`", hook.name(), hook.label());
        html = hook.apply(html).await?;
    }
    Ok(html)
}

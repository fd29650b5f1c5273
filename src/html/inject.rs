//! Canister id injection into the module entry script.
//!
//! ```html
//! <script type="module" src="/index.js"></script>
//! <!-- becomes -->
//! <script data-canister-id="rrkah-fqaaa-aaaaa-aaaaq-cai" type="module" src="/index.js"></script>
//! ```
//!
//! Only the first matching tag is rewritten.

use std::sync::LazyLock;

use regex::Regex;

use crate::canister::{CanisterIdReader, ReadText};
use crate::error::HookResult;

/// Attribute read by the front end at page load.
pub const CANISTER_ID_ATTR: &str = "data-canister-id";

static RE_MODULE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<script type="module" src="(?<src>[^"]+)"></script>"#).unwrap()
});

/// Add `data-canister-id` to the first `<script type="module" src="...">`.
///
/// The canister id is only read when such a tag exists, so documents without
/// a module script never touch the ids file.
pub fn inject_canister_id<F: ReadText>(
    html: &str,
    reader: &CanisterIdReader<F>,
) -> HookResult<String> {
    let Some(caps) = RE_MODULE_SCRIPT.captures(html) else {
        return Ok(html.to_string());
    };
    let (Some(tag), Some(src)) = (caps.get(0), caps.name("src")) else {
        return Ok(html.to_string());
    };

    let canister_id = reader.read()?;
    let replacement = format!(
        r#"<script {CANISTER_ID_ATTR}="{canister_id}" type="module" src="{}"></script>"#,
        src.as_str()
    );

    let mut out = String::with_capacity(html.len() + replacement.len() - tag.len());
    out.push_str(&html[..tag.start()]);
    out.push_str(&replacement);
    out.push_str(&html[tag.end()..]);
    Ok(out)
}

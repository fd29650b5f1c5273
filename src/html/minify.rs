//! Whitespace-only html minification.
//!
//! The document is split into markup tokens (comments, tags, and whole
//! `script`/`style`/`pre`/`textarea` elements) and the text between them.
//! Tokens are copied byte for byte, so attribute order, quoting and values
//! never change. Only text is rewritten:
//!
//! - runs of ASCII whitespace collapse to a single space
//! - whitespace touching a block-level or document-level tag is dropped
//!
//! ```text
//! <div>\n  <p>  Hello,   world </p>\n</div>  ->  <div><p>Hello, world</p></div>
//! <b>a</b>   <i>b</i>                         ->  <b>a</b> <i>b</i>
//! ```

use std::sync::LazyLock;

use regex::{Match, Regex};
use thiserror::Error;

use crate::error::{HookError, HookResult};

pub const HOOK_NAME: &str = "minify-html";

/// Comments, elements whose content is kept verbatim, and single tags.
/// Quoted attribute values may contain `>`.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)<!--.*?-->",
        r#"|<script\b(?:[^>"']|"[^"]*"|'[^']*')*>.*?</script\s*>"#,
        r#"|<style\b(?:[^>"']|"[^"]*"|'[^']*')*>.*?</style\s*>"#,
        r#"|<pre\b(?:[^>"']|"[^"]*"|'[^']*')*>.*?</pre\s*>"#,
        r#"|<textarea\b(?:[^>"']|"[^"]*"|'[^']*')*>.*?</textarea\s*>"#,
        r#"|<[!?/]?[a-z](?:[^>"']|"[^"]*"|'[^']*')*>"#,
    ))
    .unwrap()
});

/// Start of a tag or comment that never closed.
static RE_UNTERMINATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:/?[a-z]|!--)").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\n\r\x0C]+").unwrap());

static RE_TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</?([a-zA-Z][a-zA-Z0-9-]*)").unwrap());

/// Markup the minifier cannot tokenize.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinifyError {
    #[error("unterminated {construct} at byte {offset}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },
}

/// Collapse redundant whitespace in `html`.
///
/// Runs on a blocking task; the returned future resolves once the pass is
/// done. Failures come back as [`HookError::Transform`].
pub async fn minify_html(html: String) -> HookResult<String> {
    tokio::task::spawn_blocking(move || collapse_whitespace(&html))
        .await
        .map_err(|e| HookError::transform(HOOK_NAME, e))?
        .map_err(|e| HookError::transform(HOOK_NAME, e))
}

/// Synchronous core of [`minify_html`].
pub fn collapse_whitespace(html: &str) -> Result<String, MinifyError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    // document start behaves like a block boundary
    let mut after_block = true;

    for token in RE_TOKEN.find_iter(html) {
        let block = is_boundary(token);
        push_text(&mut out, html, last, token.start(), after_block, block)?;
        out.push_str(token.as_str());
        after_block = block;
        last = token.end();
    }
    push_text(&mut out, html, last, html.len(), after_block, true)?;

    Ok(out)
}

fn push_text(
    out: &mut String,
    html: &str,
    start: usize,
    end: usize,
    trim_start: bool,
    trim_end: bool,
) -> Result<(), MinifyError> {
    let text = &html[start..end];
    if let Some(m) = RE_UNTERMINATED.find(text) {
        let construct = if m.as_str() == "<!--" { "comment" } else { "tag" };
        return Err(MinifyError::Unterminated {
            construct,
            offset: start + m.start(),
        });
    }

    let collapsed = RE_WHITESPACE.replace_all(text, " ");
    let mut text: &str = &collapsed;
    if trim_start {
        text = text.trim_start_matches(' ');
    }
    if trim_end {
        text = text.trim_end_matches(' ');
    }
    out.push_str(text);
    Ok(())
}

/// Whether whitespace next to `token` is insignificant.
fn is_boundary(token: Match<'_>) -> bool {
    let token = token.as_str();
    if token.starts_with("<!--") {
        return false;
    }
    if token.starts_with("<!") || token.starts_with("<?") {
        return true;
    }
    RE_TAG_NAME
        .captures(token)
        .and_then(|caps| caps.get(1))
        .is_some_and(|name| is_boundary_element(&name.as_str().to_ascii_lowercase()))
}

/// Block-level elements plus the document-level ones that never render
/// inline text.
#[inline]
fn is_boundary_element(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "base"
            | "blockquote"
            | "body"
            | "canvas"
            | "caption"
            | "col"
            | "colgroup"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "li"
            | "link"
            | "main"
            | "meta"
            | "nav"
            | "noscript"
            | "ol"
            | "p"
            | "pre"
            | "script"
            | "section"
            | "style"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "ul"
            | "video"
    )
}

//! Post-build orchestration.
//!
//! Build pipeline phases:
//! - **Collect** - Find every `.html` document in the output directory
//! - **Transform** - Run the `html-transform` hooks over each document, in order
//! - **Compress** - Replace eligible files with compressed siblings
//!
//! Compression only starts once every document has been written back, since
//! it works on the final emitted files.

use crate::{
    canister::ReadText,
    compress::{CompressReport, compress_dir},
    config::HooksConfig,
    html::{HtmlHook, html_hooks, transform_html},
    log,
};
use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Run the whole post-build pipeline over `config.build.output`.
pub async fn build(config: &HooksConfig) -> Result<CompressReport> {
    let output = config.output_dir();
    if !output.is_dir() {
        bail!("output directory `{}` does not exist", output.display());
    }

    let hooks = html_hooks(config);
    let documents = collect_html_files(output)?;
    if hooks.is_empty() {
        log!("html"; "no html hooks enabled");
    } else {
        let changed = transform_documents(&hooks, &documents).await?;
        log!("html"; "{} of {} documents changed", changed, documents.len());
    }

    compress(config).await
}

/// Compress the output directory on a blocking task.
pub async fn compress(config: &HooksConfig) -> Result<CompressReport> {
    let dir = config.output_dir().to_path_buf();
    let settings = config.compress.clone();

    let report = tokio::task::spawn_blocking(move || compress_dir(&dir, &settings))
        .await
        .context("compression task panicked")?
        .context("compress")?;
    Ok(report)
}

/// Run `hooks` over every document, rewriting the ones that change.
///
/// Returns the number of documents written back.
pub async fn transform_documents<F: ReadText>(
    hooks: &[HtmlHook<F>],
    documents: &[PathBuf],
) -> Result<usize> {
    let mut changed = 0;
    for path in documents {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let transformed = transform_html(hooks, html.clone())
            .await
            .with_context(|| format!("html-transform failed for `{}`", path.display()))?;

        if transformed != html {
            fs::write(path, transformed)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            crate::debug!("html"; "{}", path.display());
            changed += 1;
        }
    }
    Ok(changed)
}

/// Collect `.html` files under `dir`, sorted.
///
/// A directory that cannot be walked fails the collection instead of
/// silently hiding its documents.
pub fn collect_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.with_context(|| format!("failed to walk `{}`", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension() == Some(OsStr::new("html")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ============================================================================
// tests
// ============================================================================

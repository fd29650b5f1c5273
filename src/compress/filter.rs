//! Which build output files get compressed.

use std::path::Path;

use crate::config::CompressConfig;

/// Why a file is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Extension is in the exclusion list.
    Excluded,
    /// Already a compressed sibling.
    Compressed,
    /// Smaller than the configured threshold.
    BelowThreshold,
}

/// Extension of `path` including the leading dot, `""` when there is none.
///
/// Mirrors node's `path.extname`: `index.js` -> `.js`, `a.min.js` -> `.js`,
/// `.htaccess` -> `""`, `Makefile` -> `""`.
pub fn extname(path: &Path) -> &str {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return "";
    };
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Eligibility check for one file of `size` bytes.
pub fn check(path: &Path, size: u64, config: &CompressConfig) -> Option<Skip> {
    let ext = extname(path);
    if config.exclude.iter().any(|e| e == ext) {
        return Some(Skip::Excluded);
    }
    if ext == config.ext {
        return Some(Skip::Compressed);
    }
    if size < config.threshold {
        return Some(Skip::BelowThreshold);
    }
    None
}

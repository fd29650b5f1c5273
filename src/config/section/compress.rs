//! `[compress]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [compress]
//! algorithm = "gzip"
//! ext = ".gz"
//! exclude = [".html", ".css", ".webp", ".png", ".ico", ".svg"]
//! delete_origin = true
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Extensions served uncompressed.
pub const DEFAULT_EXCLUDE: [&str; 6] = [".html", ".css", ".webp", ".png", ".ico", ".svg"];

/// Compression algorithm for emitted siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Gzip,
    /// zlib-wrapped deflate.
    Deflate,
    DeflateRaw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    pub enable: bool,
    pub algorithm: Algorithm,
    /// Appended to the original file name.
    pub ext: String,
    /// Extensions (with leading dot) left uncompressed.
    pub exclude: Vec<String>,
    /// Remove the original once its compressed sibling is written.
    pub delete_origin: bool,
    /// Files smaller than this many bytes are skipped.
    pub threshold: u64,
    /// Compression level, 0-9.
    pub level: u32,
    /// Log every compressed file with its sizes.
    pub verbose: bool,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            enable: true,
            algorithm: Algorithm::Gzip,
            ext: ".gz".into(),
            exclude: DEFAULT_EXCLUDE.iter().map(|e| (*e).to_string()).collect(),
            delete_origin: true,
            threshold: 0,
            level: 9,
            verbose: false,
        }
    }
}

impl CompressConfig {
    pub fn validate(&self, errors: &mut Vec<String>) {
        if !is_extension(&self.ext) {
            errors.push(format!(
                "[compress] ext must start with '.' and have a name, got '{}'",
                self.ext
            ));
        }
        for ext in &self.exclude {
            if !is_extension(ext) {
                errors.push(format!(
                    "[compress] exclude entries must start with '.', got '{ext}'"
                ));
            }
        }
        if self.level > 9 {
            errors.push(format!(
                "[compress] level must be between 0 and 9, got {}",
                self.level
            ));
        }
    }
}

fn is_extension(ext: &str) -> bool {
    ext.len() > 1 && ext.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let mut errors = Vec::new();
        CompressConfig::default().validate(&mut errors);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_invalid_values() {
        let config = CompressConfig {
            ext: "gz".into(),
            exclude: vec![".html".into(), "png".into()],
            level: 12,
            ..CompressConfig::default()
        };
        let mut errors = Vec::new();
        config.validate(&mut errors);
        assert_eq!(errors.len(), 3);
        assert!(errors[1].contains("'png'"));
    }

    #[test]
    fn test_algorithm_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            algorithm: Algorithm,
        }
        let parsed: Wrapper = toml::from_str(r#"algorithm = "deflate-raw""#).unwrap();
        assert_eq!(parsed.algorithm, Algorithm::DeflateRaw);
    }
}

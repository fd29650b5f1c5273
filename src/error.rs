//! Errors raised by the build hooks.
//!
//! Every variant is fatal: hooks never retry and never fall back, the error
//! is handed to the caller which aborts the build.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed cause from an external collaborator (the html minifier).
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum HookError {
    /// The canister ids file is missing, unreadable, malformed, or holds
    /// no usable id.
    #[error("could not get canister ID from {}: {reason}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// The external minifier rejected the document.
    #[error("`{hook}` hook failed")]
    Transform {
        hook: &'static str,
        #[source]
        source: BoxedCause,
    },

    /// Reading, writing or deleting a build output file failed.
    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HookError {
    pub fn configuration(path: &Path, reason: impl ToString) -> Self {
        Self::Configuration {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn transform(hook: &'static str, source: impl Into<BoxedCause>) -> Self {
        Self::Transform {
            hook,
            source: source.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type HookResult<T> = Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_configuration_message_names_path_and_cause() {
        let err = HookError::configuration(
            Path::new("./.dfx/local/canister_ids.json"),
            "No such file or directory",
        );
        assert_eq!(
            err.to_string(),
            "could not get canister ID from ./.dfx/local/canister_ids.json: No such file or directory"
        );
    }

    #[test]
    fn test_transform_keeps_cause() {
        let err = HookError::transform("minify-html", "unexpected end of input");
        assert!(err.to_string().contains("minify-html"));
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("unexpected end of input")
        );
    }

    #[test]
    fn test_io_display() {
        let err = HookError::io(
            Path::new("dist/index.js"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("dist/index.js"));
    }
}

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading `canister-hooks.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("canister-hooks.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("canister-hooks.toml"));

        let validation_err = ConfigError::Validation(vec![
            "[canister] name must not be empty".into(),
            "[compress] level must be between 0 and 9, got 10".into(),
        ]);
        let display = format!("{validation_err}");
        assert!(display.contains("name must not be empty"));
        assert!(display.contains("got 10"));
    }
}

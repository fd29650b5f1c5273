//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/src/frontend/       ← start
/// /home/user/app/canister-hooks.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_parent() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("canister-hooks.toml");
        fs::write(&config, "").unwrap();
        let nested = dir.path().join("src/frontend");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested, Path::new("canister-hooks.toml"));
        assert_eq!(found, Some(config));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("hooks.toml");

        assert_eq!(find_config_file(dir.path(), &config), None);
        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(dir.path(), &config), Some(config));
    }

    #[test]
    fn test_absolute_directory_is_not_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("hooks.toml");
        fs::create_dir_all(&config).unwrap();

        assert_eq!(find_config_file(dir.path(), &config), None);
    }

    #[test]
    fn test_directory_is_not_config() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("canister-hooks.toml");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested, Path::new("canister-hooks.toml"));
        assert_ne!(found.as_deref(), Some(nested.as_path()));
    }
}

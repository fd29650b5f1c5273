//! Hook configuration from `canister-hooks.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── canister   # [canister]
//! │   ├── compress   # [compress]
//! │   └── html       # [html]
//! ├── error          # ConfigError
//! ├── util           # Config file discovery
//! └── mod.rs         # HooksConfig (this file)
//! ```
//!
//! The file is optional. Without one every section takes its defaults and
//! the working directory is the project root.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{Algorithm, CanisterConfig, CompressConfig};

use section::{BuildConfig, HtmlConfig};

use util::find_config_file;

use crate::cli::{Cli, Commands, CompressArgs, HtmlArgs, OutputArgs};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing canister-hooks.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Path of the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub build: BuildConfig,
    pub canister: CanisterConfig,
    pub html: HtmlConfig,
    pub compress: CompressConfig,
}

impl HooksConfig {
    /// Load configuration for the current working directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, cli)
    }

    /// Load configuration searching upward from `cwd`, then apply CLI
    /// overrides, resolve paths against the root and validate.
    pub fn load_from(cwd: &Path, cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(cwd, &cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "`{}` not found, using defaults", cli.config.display());
                Self {
                    root: cwd.to_path_buf(),
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(cli);
        config.normalize_paths();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring: {}", path.display(), fields.join(", "));
    }

    /// Build output directory.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.canister.ids_file, cli.canister.ids_file.as_ref());
        Self::update_option(&mut self.canister.name, cli.canister.canister.as_ref());
        Self::update_option(&mut self.canister.network, cli.canister.network.as_ref());

        match &cli.command {
            Commands::Build {
                output,
                html,
                compress,
            } => {
                self.apply_output_args(output);
                self.apply_html_args(html);
                self.apply_compress_args(compress);
            }
            Commands::Compress { output, compress } => {
                self.apply_output_args(output);
                self.apply_compress_args(compress);
            }
            Commands::Inject { .. } | Commands::Minify { .. } | Commands::CanisterId => {}
        }
    }

    fn apply_output_args(&mut self, args: &OutputArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
    }

    fn apply_html_args(&mut self, args: &HtmlArgs) {
        Self::update_option(&mut self.html.inject_canister_id, args.inject.as_ref());
        Self::update_option(&mut self.html.minify, args.minify.as_ref());
    }

    fn apply_compress_args(&mut self, args: &CompressArgs) {
        Self::update_option(&mut self.compress.enable, args.compress.as_ref());
        Self::update_option(&mut self.compress.delete_origin, args.delete_origin.as_ref());
        Self::update_option(&mut self.compress.algorithm, args.algorithm.as_ref());
        Self::update_option(&mut self.compress.level, args.level.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization & validation
    // ========================================================================

    /// Resolve relative paths against the root directory.
    fn normalize_paths(&mut self) {
        self.canister.ids_file = self.root.join(&self.canister.ids_file);
        self.build.output = self.root.join(&self.build.output);
    }

    /// Check every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.canister.validate(&mut errors);
        self.compress.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

impl FromStr for HooksConfig {
    type Err = ConfigError;

    /// Parse configuration from TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

// ============================================================================
// tests
// ============================================================================

//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Algorithm;

/// Post-build hooks for canister front ends
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: canister-hooks.toml)
    #[arg(short = 'C', long, global = true, default_value = "canister-hooks.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub canister: CanisterArgs,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the html hooks over every html document, then compress the output
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        html: HtmlArgs,

        #[command(flatten)]
        compress: CompressArgs,
    },

    /// Inject the canister id into one html document
    #[command(visible_alias = "i")]
    Inject {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Collapse whitespace in one html document
    #[command(visible_alias = "m")]
    Minify {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Compress the build output
    #[command(visible_alias = "c")]
    Compress {
        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        compress: CompressArgs,
    },

    /// Print the canister id from the dfx ids file
    CanisterId,
}

/// Where the canister id comes from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CanisterArgs {
    /// dfx canister ids file (relative to project root)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub ids_file: Option<PathBuf>,

    /// Canister name to look up
    #[arg(long, global = true)]
    pub canister: Option<String>,

    /// Network name to look up
    #[arg(long, global = true)]
    pub network: Option<String>,
}

/// Build output directory override.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Build output directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

/// Toggles for the html hooks.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct HtmlArgs {
    /// Inject the canister id into the module entry script
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub inject: Option<bool>,

    /// Minify html documents
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Compression overrides.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CompressArgs {
    /// Compress build output
    #[arg(short = 'z', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub compress: Option<bool>,

    /// Delete originals after compressing
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub delete_origin: Option<bool>,

    /// Compression algorithm
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Compression level (0-9)
    #[arg(short, long)]
    pub level: Option<u32>,
}

/// A single html document to transform.
#[derive(clap::Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Html document to read
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Rewrite the input file in place
    #[arg(short = 'w', long, conflicts_with = "output")]
    pub write: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("canister-hooks").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_build_defaults() {
        let cli = parse(&["build"]);
        assert_eq!(cli.config, PathBuf::from("canister-hooks.toml"));
        let Commands::Build {
            output,
            html,
            compress,
        } = cli.command
        else {
            panic!("expected build");
        };
        assert!(output.output.is_none());
        assert!(html.minify.is_none());
        assert!(compress.delete_origin.is_none());
    }

    #[test]
    fn test_bool_flags() {
        let cli = parse(&["build", "--minify", "--delete-origin=false"]);
        let Commands::Build { html, compress, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(html.minify, Some(true));
        assert_eq!(compress.delete_origin, Some(false));
    }

    #[test]
    fn test_global_canister_args() {
        let cli = parse(&["canister-id", "--network", "ic", "--canister", "frontend"]);
        assert!(matches!(cli.command, Commands::CanisterId));
        assert_eq!(cli.canister.network.as_deref(), Some("ic"));
        assert_eq!(cli.canister.canister.as_deref(), Some("frontend"));
    }

    #[test]
    fn test_document_args() {
        let cli = parse(&["inject", "dist/index.html", "-o", "out.html"]);
        let Commands::Inject { document } = cli.command else {
            panic!("expected inject");
        };
        assert_eq!(document.input, PathBuf::from("dist/index.html"));
        assert_eq!(document.output, Some(PathBuf::from("out.html")));

        assert!(
            Cli::try_parse_from(["canister-hooks", "minify", "a.html", "-w", "-o", "b.html"])
                .is_err()
        );
    }

    #[test]
    fn test_algorithm_value() {
        let cli = parse(&["compress", "--algorithm", "deflate-raw"]);
        let Commands::Compress { compress, .. } = cli.command else {
            panic!("expected compress");
        };
        assert_eq!(compress.algorithm, Some(Algorithm::DeflateRaw));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! canister-hooks - post-build hooks for canister front ends.
//!
//! Run after the bundler has emitted the front end:
//! - injects the locally deployed canister id into the module entry script
//! - collapses whitespace in html documents
//! - replaces eligible assets with compressed siblings

mod canister;
mod cli;
mod compress;
mod config;
mod error;
mod html;
mod logger;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::HooksConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = HooksConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(&cli, &config))
}

async fn run(cli: &Cli, config: &HooksConfig) -> Result<()> {
    match &cli.command {
        Commands::Build { .. } => cli::build::build(config).await.map(|_| ()),
        Commands::Compress { .. } => cli::build::compress(config).await.map(|_| ()),
        Commands::Inject { document } => cli::document::inject(config, document).await,
        Commands::Minify { document } => cli::document::minify(document).await,
        Commands::CanisterId => cli::document::print_canister_id(config),
    }
}

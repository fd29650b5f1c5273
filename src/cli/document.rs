//! Single-document commands: `inject`, `minify` and `canister-id`.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::{
    canister::{CanisterIdReader, ReadText},
    config::HooksConfig,
    html::{HtmlHook, transform_html},
};

use super::DocumentArgs;

/// Run `hook` over the document named by `args`.
pub async fn run_hook<F: ReadText>(hook: HtmlHook<F>, args: &DocumentArgs) -> Result<()> {
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read `{}`", args.input.display()))?;
    let transformed = transform_html(std::slice::from_ref(&hook), html)
        .await
        .with_context(|| format!("`{}` failed for `{}`", hook.label(), args.input.display()))?;

    let target = if args.write {
        Some(&args.input)
    } else {
        args.output.as_ref()
    };

    match target {
        Some(path) => fs::write(path, transformed)
            .with_context(|| format!("failed to write `{}`", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(transformed.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Inject the configured canister id into one document.
pub async fn inject(config: &HooksConfig, args: &DocumentArgs) -> Result<()> {
    let reader = CanisterIdReader::from_config(&config.canister);
    run_hook(HtmlHook::InjectCanisterId(reader), args).await
}

/// Minify one document.
pub async fn minify(args: &DocumentArgs) -> Result<()> {
    run_hook(HtmlHook::<crate::canister::LocalFs>::Minify, args).await
}

/// Print the configured canister id.
pub fn print_canister_id(config: &HooksConfig) -> Result<()> {
    let id = CanisterIdReader::from_config(&config.canister).read()?;
    println!("{id}");
    Ok(())
}

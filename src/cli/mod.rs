//! Command-line interface module.

mod args;
pub mod build;
pub mod document;

pub use args::{Cli, Commands, CompressArgs, DocumentArgs, HtmlArgs, OutputArgs};

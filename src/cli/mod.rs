//! Command line interface for the release packager.
//!
//! Parses arguments, loads the publish manifest, and dispatches to the
//! publish or docker command.

mod args;
pub mod commands;
mod output;
pub mod summary;

pub use args::{Args, Command};
pub use output::OutputManager;
pub use summary::SummaryFormat;

use std::path::Path;

use crate::config;
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()?;

    let output = OutputManager::new(args.verbose, args.quiet);

    let mut manifest = config::load(&args.config)?;
    if !args.targets.is_empty() {
        manifest.retain_targets(&args.targets)?;
    }
    if !args.format.is_json() {
        output.verbose(&format!(
            "Loaded {} target(s) from {}",
            manifest.targets().len(),
            args.config.display()
        ));
    }

    // Paths in the manifest are relative to the manifest itself
    let base_dir = args
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let settings = manifest.into_settings(base_dir, args.output.as_deref())?;

    match args.command.unwrap_or(Command::Publish) {
        Command::Publish => commands::publish::run(settings, &output, args.format).await,
        Command::Docker => commands::docker::run(&settings, &output).await,
    }
}

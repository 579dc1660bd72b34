//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with
//! validation of flag combinations before any work starts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::summary::SummaryFormat;
use crate::error::CliError;

/// Release packager for the launcher
#[derive(Parser, Debug)]
#[command(
    name = "launcher-publish",
    version,
    about = "Builds and packages the launcher for every configured platform target",
    long_about = "Builds the launcher once per configured platform target, cleans the build \
output, and packages each target as a distributable zip archive.

Reads a publish.toml manifest describing the product, the build tool, and the targets.

Usage:
  launcher-publish
  launcher-publish --target Linux-x64 --target Windows-x64
  launcher-publish --config ci/publish.toml --format json --quiet
  launcher-publish docker

Exit code 0 = the run finished; skipped targets are reported, not fatal."
)]
pub struct Args {
    /// Packaging mode to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the publish manifest
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "LAUNCHER_PUBLISH_CONFIG",
        default_value = "publish.toml",
        global = true
    )]
    pub config: PathBuf,

    /// Output directory override for archives and notes
    #[arg(short, long, value_name = "DIR", global = true)]
    pub output: Option<PathBuf>,

    /// Package only the named targets (repeatable)
    #[arg(short, long = "target", value_name = "NAME", global = true)]
    pub targets: Vec<String>,

    /// Summary format printed at the end of a run
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text, global = true)]
    pub format: SummaryFormat,

    /// Suppress everything except warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print diagnostic detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Packaging modes
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Command {
    /// Build and package every configured target on this host (default)
    Publish,
    /// Build inside Docker and collect the Linux artifacts
    Docker,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self.quiet && self.verbose {
            return Err(CliError::ConflictingArguments {
                arguments: vec!["--quiet".to_string(), "--verbose".to_string()],
            });
        }

        if self.targets.iter().any(|name| name.trim().is_empty()) {
            return Err(CliError::InvalidArguments {
                reason: "--target names cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_and_verbose_conflict() {
        let args = Args::parse_from(["launcher-publish", "--quiet", "--verbose"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn targets_accumulate_in_order() {
        let args = Args::parse_from([
            "launcher-publish",
            "--target",
            "Linux-x64",
            "-t",
            "Windows-x64",
        ]);
        assert_eq!(args.targets, vec!["Linux-x64", "Windows-x64"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn config_defaults_to_publish_toml() {
        let args = Args::parse_from(["launcher-publish"]);
        assert_eq!(args.config, PathBuf::from("publish.toml"));
        assert!(args.command.is_none());
    }

    #[test]
    fn docker_subcommand_parses_with_global_flags() {
        let args = Args::parse_from(["launcher-publish", "docker", "--config", "ci/publish.toml"]);
        assert!(matches!(args.command, Some(Command::Docker)));
        assert_eq!(args.config, PathBuf::from("ci/publish.toml"));
    }
}

//! Release packaging library for the launcher.
//!
//! This library drives an external build tool across a list of platform
//! targets and turns each build into a distributable artifact:
//! - per-target zip archives with a canonical executable name
//! - macOS .app bundles zipped the same way
//! - an optional glibc note describing the Linux build floor
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PublishError, Result};

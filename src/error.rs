//! Error types for the publish CLI.
//!
//! Packaging-level failures live in [`crate::packager::Error`]; this module wraps
//! them together with CLI and serialization errors for the binary's exit path.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Every way the publish binary can fail.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Bad command line usage
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO failures outside the packaging pipeline
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Run summary serialization failures
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest parse failures
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failures inside the packaging pipeline
    #[error("Packaging error: {0}")]
    Packager(#[from] crate::packager::Error),

    /// Interop with anyhow-based callers
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Errors raised by argument validation and command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Arguments that parse but cannot be used as given
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// What was wrong with them
        reason: String,
    },

    /// Flags that cannot be combined
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// The offending flags
        arguments: Vec<String>,
    },

    /// An external command was started but did not finish cleanly
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Why it failed
        reason: String,
    },
}

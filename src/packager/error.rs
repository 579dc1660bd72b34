//! Error types for packaging operations.
//!
//! Every step of a target's pipeline reports through [`Error`]; the run loop
//! decides whether a failure aborts the run or only skips the current target.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, cleaning, or archiving a target
#[derive(Error, Debug)]
pub enum Error {
    /// Plain IO errors without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors annotated with the operation and path that failed
    #[error("error {action} at {}: {source}", path.display())]
    Fs {
        /// What the operation was doing
        action: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An external command could not be spawned
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// The build tool ran but exited unsuccessfully
    #[error("build tool exited with status {code:?} for target {target}")]
    BuildFailed {
        /// Display name of the target being built
        target: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// The build tool reported success but produced nothing usable
    #[error("no build output at {}", dir.display())]
    NoBuildOutput {
        /// Directory that was expected to contain the build output
        dir: PathBuf,
    },

    /// More than one toolchain version directory under the release root
    #[error(
        "multiple toolchain version directories under {}: {candidates:?} - remove the stale ones",
        dir.display()
    )]
    AmbiguousToolchainVersion {
        /// Release root that was inspected
        dir: PathBuf,
        /// Names of the version directories found
        candidates: Vec<String>,
    },

    /// The cleaned build output contains no executable to publish
    #[error(
        "no usable executable in {}: expected {expected} or {expected}.exe",
        dir.display()
    )]
    NoUsableExecutable {
        /// Publish directory that was inspected
        dir: PathBuf,
        /// Executable name the build tool should have produced
        expected: String,
    },

    /// A configured macOS bundle input file is absent
    #[error("missing macOS bundle {kind}: {}", path.display())]
    MissingBundleInput {
        /// Which input is missing (icon, Info.plist)
        kind: &'static str,
        /// Configured path that does not exist
        path: PathBuf,
    },

    /// The host OS cannot drive the requested packaging mode
    #[error("unsupported host platform: {os}")]
    UnsupportedHost {
        /// `std::env::consts::OS` of the host
        os: String,
    },

    /// Archive creation errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal errors
    #[error("directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// Path prefix errors while staging archives
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Early-return with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::error::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Attach a message to `Option` and error values, converting to [`Error::GenericError`].
pub trait Context<T> {
    /// Wrap the error with a static message
    fn context(self, msg: &str) -> Result<T>;

    /// Wrap the error with a lazily built message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| Error::GenericError(f()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

/// Attach operation and path context to raw IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] with the action and path recorded
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

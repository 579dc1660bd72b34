//! Multi-target release packaging.
//!
//! Takes one immutable [`Settings`] instance and produces one zip
//! archive per configured platform target, plus a [`RunReport`]
//! describing what was packaged and what was skipped.

pub mod archive;
pub mod build;
pub mod checksum;
pub mod clean;
pub mod error;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod platform;
pub mod settings;
pub mod utils;

// Re-export the primary types
pub use error::{Context, Error, ErrorExt, Result};
pub use pipeline::Packager;
pub use settings::{
    BuildToolSettings, DockerSettings, MacOsSettings, PlatformTarget, ProductSettings, Settings,
    SettingsBuilder, TargetOs,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One finished archive produced by a publish run.
#[derive(Debug, Clone, Serialize)]
pub struct PackagedArtifact {
    /// Target the archive was packaged for
    pub target: PlatformTarget,
    /// Path of the zip archive inside the output directory
    pub path: PathBuf,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 checksum of the archive
    pub sha256: String,
}

/// A target that produced no artifact in this run.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTarget {
    /// Target that was skipped
    pub target: PlatformTarget,
    /// Human-readable reason the target was skipped
    pub reason: String,
}

/// Summary of one publish run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Archives produced, in target order
    pub artifacts: Vec<PackagedArtifact>,
    /// Targets skipped after a failure, in target order
    pub skipped: Vec<SkippedTarget>,
    /// Path of the glibc note, when one was written
    pub glibc_note: Option<PathBuf>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        artifacts: Vec<PackagedArtifact>,
        skipped: Vec<SkippedTarget>,
        glibc_note: Option<PathBuf>,
    ) -> Self {
        Self {
            artifacts,
            skipped,
            glibc_note,
            finished_at: Utc::now(),
        }
    }

    /// Returns true when every configured target produced an artifact.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

//! Docker publish mode settings.

use std::path::PathBuf;

/// Configuration for the containerized publish mode.
///
/// All fields are optional; image and Dockerfile names fall back to
/// conventions derived from the product file name and the repository
/// root.
#[derive(Debug, Clone, Default)]
pub struct DockerSettings {
    /// Image tag for the build image.
    ///
    /// Default: lowercased product file name with a `-build` suffix.
    pub image: Option<String>,

    /// Dockerfile used on Linux hosts.
    ///
    /// Default: `Dockerfile.linux` next to the manifest.
    pub dockerfile: Option<PathBuf>,
}

//! macOS app bundle settings.

use std::path::PathBuf;

/// Inputs for assembling the macOS `.app` bundle.
///
/// Both files are copied into the bundle byte for byte; no templating
/// or plist rewriting happens at publish time.
#[derive(Debug, Clone)]
pub struct MacOsSettings {
    /// Bundle directory name without the `.app` suffix.
    ///
    /// Default: the product's display name.
    pub bundle_name: Option<String>,

    /// Path to the `.icns` application icon.
    ///
    /// Copied into `Contents/Resources` under its own file name.
    pub icon: PathBuf,

    /// Path to the prepared `Info.plist`.
    ///
    /// Copied to `Contents/Info.plist` unchanged.
    pub info_plist: PathBuf,
}

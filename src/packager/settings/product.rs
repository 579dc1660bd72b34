//! Product identity settings.

/// Product identity used to name published artifacts.
///
/// The display name and the on-disk file name are configured separately
/// because most products carry spaces in their display name but ship
/// executables and archives without them.
///
/// # Examples
///
/// ```no_run
/// use launcher_publish::packager::ProductSettings;
///
/// let product = ProductSettings {
///     name: "Nexus LU Launcher".into(),
///     file_name: "Nexus-LU-Launcher".into(),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductSettings {
    /// Human-readable product name.
    ///
    /// Used for the macOS `.app` bundle directory unless overridden in
    /// the macOS settings.
    pub name: String,

    /// Canonical file name for executables and archives.
    ///
    /// The primary executable in every publish directory is renamed to
    /// this, and archives are named `<file_name>-<target name>.zip`.
    pub file_name: String,
}

//! External build tool invocation settings.

use std::path::PathBuf;

/// Placeholder replaced with the target's runtime identifier.
pub const RUNTIME_PLACEHOLDER: &str = "{runtime}";

/// Placeholder replaced with the build configuration.
pub const CONFIGURATION_PLACEHOLDER: &str = "{configuration}";

/// Placeholder replaced with the project file path.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Configuration for the external build tool invoked once per target.
///
/// The argument list is a template: every occurrence of
/// [`RUNTIME_PLACEHOLDER`], [`CONFIGURATION_PLACEHOLDER`], and
/// [`PROJECT_PLACEHOLDER`] is substituted before the tool is spawned.
///
/// # Examples
///
/// ```no_run
/// use launcher_publish::packager::BuildToolSettings;
///
/// let build = BuildToolSettings {
///     program: "dotnet".into(),
///     args: vec![
///         "publish".into(),
///         "-r".into(),
///         "{runtime}".into(),
///         "-c".into(),
///         "{configuration}".into(),
///         "{project}".into(),
///     ],
///     project: "Launcher/Launcher.csproj".into(),
///     configuration: "Release".into(),
///     output_name: None,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildToolSettings {
    /// Program to invoke, resolved through `PATH`.
    pub program: String,

    /// Argument template passed to the program.
    pub args: Vec<String>,

    /// Path to the project file handed to the build tool.
    ///
    /// Its parent directory anchors the build output layout.
    pub project: PathBuf,

    /// Build configuration substituted into the argument template.
    ///
    /// Also names the first directory level of the build output.
    pub configuration: String,

    /// Executable name the build tool emits, without extension.
    ///
    /// Default: the project file's stem.
    pub output_name: Option<String>,
}

impl BuildToolSettings {
    /// Default argument template for `dotnet publish`-style tools.
    pub fn default_args() -> Vec<String> {
        vec![
            "publish".to_string(),
            "-r".to_string(),
            RUNTIME_PLACEHOLDER.to_string(),
            "-c".to_string(),
            CONFIGURATION_PLACEHOLDER.to_string(),
            PROJECT_PLACEHOLDER.to_string(),
        ]
    }
}

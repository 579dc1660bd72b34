//! Core Settings struct and implementations.

use super::{BuildToolSettings, DockerSettings, MacOsSettings, PlatformTarget, ProductSettings};
use std::path::{Path, PathBuf};

/// Main settings for a publish run.
///
/// Central configuration for the packager, constructed once via
/// [`SettingsBuilder`] and treated as immutable for the rest of the run.
///
/// # Examples
///
/// ```no_run
/// use launcher_publish::packager::{
///     BuildToolSettings, PlatformTarget, ProductSettings, SettingsBuilder, TargetOs,
/// };
///
/// # fn example() -> launcher_publish::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product(ProductSettings {
///         name: "My App".into(),
///         file_name: "My-App".into(),
///     })
///     .build_tool(BuildToolSettings {
///         program: "dotnet".into(),
///         args: BuildToolSettings::default_args(),
///         project: "App/App.csproj".into(),
///         configuration: "Release".into(),
///         output_name: None,
///     })
///     .output_directory("bin")
///     .targets(vec![PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux)])
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`ProductSettings`] - Product identity
/// - [`BuildToolSettings`] - Build tool invocation
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product identity.
    product: ProductSettings,

    /// Build tool invocation.
    build: BuildToolSettings,

    /// Directory that receives archives and notes.
    ///
    /// Deleted and recreated at the start of every run.
    output_dir: PathBuf,

    /// Repository root, used as the Docker build context.
    root_dir: PathBuf,

    /// Targets to package, in run order.
    targets: Vec<PlatformTarget>,

    /// macOS bundle inputs.
    ///
    /// None means macOS targets fail with a missing-input error.
    macos: Option<MacOsSettings>,

    /// Docker mode overrides.
    docker: Option<DockerSettings>,

    /// Executable name the build tool emits, resolved from the project
    /// file stem when not configured explicitly.
    tool_output_name: String,
}

impl Settings {
    /// Returns the product display name.
    pub fn product_name(&self) -> &str {
        &self.product.name
    }

    /// Returns the canonical file name for executables and archives.
    pub fn file_name(&self) -> &str {
        &self.product.file_name
    }

    /// Returns the build tool invocation settings.
    pub fn build(&self) -> &BuildToolSettings {
        &self.build
    }

    /// Returns the output directory for archives and notes.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the repository root.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the targets in run order.
    pub fn targets(&self) -> &[PlatformTarget] {
        &self.targets
    }

    /// Returns the macOS bundle inputs, if configured.
    pub fn macos(&self) -> Option<&MacOsSettings> {
        self.macos.as_ref()
    }

    /// Returns the executable name the build tool emits.
    pub fn tool_output_name(&self) -> &str {
        &self.tool_output_name
    }

    /// Returns the Docker image tag for the containerized build.
    pub fn docker_image(&self) -> String {
        self.docker
            .as_ref()
            .and_then(|d| d.image.clone())
            .unwrap_or_else(|| format!("{}-build", self.product.file_name.to_lowercase()))
    }

    /// Returns the Dockerfile used on Linux hosts.
    pub fn dockerfile(&self) -> PathBuf {
        self.docker
            .as_ref()
            .and_then(|d| d.dockerfile.clone())
            .unwrap_or_else(|| self.root_dir.join("Dockerfile.linux"))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product: ProductSettings,
        build: BuildToolSettings,
        output_dir: PathBuf,
        root_dir: PathBuf,
        targets: Vec<PlatformTarget>,
        macos: Option<MacOsSettings>,
        docker: Option<DockerSettings>,
        tool_output_name: String,
    ) -> Self {
        Self {
            product,
            build,
            output_dir,
            root_dir,
            targets,
            macos,
            docker,
            tool_output_name,
        }
    }
}

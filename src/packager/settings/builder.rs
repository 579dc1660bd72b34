//! Builder for constructing Settings.

use super::{BuildToolSettings, DockerSettings, MacOsSettings, PlatformTarget, ProductSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for assembling publish settings with validation.
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
///     .targets(vec![
///         PlatformTarget::new("Windows-x64", "win-x64", TargetOs::Windows),
///         PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux),
///     ])
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    product: Option<ProductSettings>,
    build: Option<BuildToolSettings>,
    output_dir: Option<PathBuf>,
    root_dir: Option<PathBuf>,
    targets: Vec<PlatformTarget>,
    macos: Option<MacOsSettings>,
    docker: Option<DockerSettings>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product identity.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the build tool invocation.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn build_tool(mut self, build: BuildToolSettings) -> Self {
        self.build = Some(build);
        self
    }

    /// Sets the output directory for archives and notes.
    ///
    /// Default: `bin`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the repository root used as the Docker build context.
    ///
    /// Default: the current directory
    pub fn root_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the targets to package, in run order.
    ///
    /// # Required
    ///
    /// At least one target is required for building.
    pub fn targets(mut self, targets: Vec<PlatformTarget>) -> Self {
        self.targets = targets;
        self
    }

    /// Sets the macOS bundle inputs.
    ///
    /// Default: None (macOS targets fail with a missing-input error)
    pub fn macos(mut self, macos: MacOsSettings) -> Self {
        self.macos = Some(macos);
        self
    }

    /// Sets Docker mode overrides.
    ///
    /// Default: None (conventional image tag and Dockerfile)
    pub fn docker(mut self, docker: DockerSettings) -> Self {
        self.docker = Some(docker);
        self
    }

    /// Builds the settings.
    ///
    /// Resolves the build tool's output name from the project file stem
    /// when it is not configured explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `product`
    /// - `build_tool`
    /// - at least one target
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        let product = self.product.context("product settings are required")?;
        let build = self.build.context("build tool settings are required")?;

        if self.targets.is_empty() {
            crate::bail!("at least one target is required");
        }

        let tool_output_name = match &build.output_name {
            Some(name) => name.clone(),
            None => build
                .project
                .file_stem()
                .and_then(|stem| stem.to_str())
                .with_context(|| {
                    format!(
                        "cannot derive an output name from project path {}",
                        build.project.display()
                    )
                })?
                .to_string(),
        };

        Ok(Settings::new(
            product,
            build,
            self.output_dir.unwrap_or_else(|| PathBuf::from("bin")),
            self.root_dir.unwrap_or_else(|| PathBuf::from(".")),
            self.targets,
            self.macos,
            self.docker,
            tool_output_name,
        ))
    }
}

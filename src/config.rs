//! Publish manifest loading.
//!
//! The manifest is a TOML file, `publish.toml` by default, describing
//! the product, the build tool invocation, and the platform targets.
//! Relative paths in the manifest are resolved against the manifest's
//! own directory, so the tool can be invoked from anywhere.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};
use crate::packager::{
    BuildToolSettings, DockerSettings, MacOsSettings, PlatformTarget, ProductSettings, Settings,
    SettingsBuilder,
};

/// Parsed publish manifest, not yet resolved against a base directory.
#[derive(Debug, Deserialize)]
pub struct PublishManifest {
    product: ProductSection,
    build: BuildSection,
    #[serde(default)]
    output: OutputSection,
    targets: Vec<PlatformTarget>,
    #[serde(default)]
    macos: Option<MacOsSection>,
    #[serde(default)]
    docker: Option<DockerSection>,
}

#[derive(Debug, Deserialize)]
struct ProductSection {
    name: String,
    #[serde(default)]
    file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildSection {
    program: String,
    #[serde(default = "BuildToolSettings::default_args")]
    args: Vec<String>,
    project: PathBuf,
    #[serde(default = "default_configuration")]
    configuration: String,
    #[serde(default)]
    output_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    #[serde(default = "default_output_dir")]
    directory: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MacOsSection {
    #[serde(default)]
    bundle_name: Option<String>,
    icon: PathBuf,
    info_plist: PathBuf,
}

#[derive(Debug, Deserialize)]
struct DockerSection {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    dockerfile: Option<PathBuf>,
}

fn default_configuration() -> String {
    "Release".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("bin")
}

/// Loads and validates the manifest at `path`.
///
/// # Errors
///
/// Returns a CLI error when the file cannot be read, a TOML error when
/// it does not parse, and a CLI error when it configures no targets or
/// repeats a target name.
pub fn load(path: &Path) -> Result<PublishManifest> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::InvalidArguments {
        reason: format!("cannot read manifest {}: {e}", path.display()),
    })?;

    let manifest: PublishManifest = toml::from_str(&text)?;

    if manifest.targets.is_empty() {
        return Err(CliError::InvalidArguments {
            reason: format!("manifest {} configures no targets", path.display()),
        }
        .into());
    }

    for (index, target) in manifest.targets.iter().enumerate() {
        let duplicated = manifest.targets[..index]
            .iter()
            .any(|other| other.name() == target.name());
        if duplicated {
            return Err(CliError::InvalidArguments {
                reason: format!("target name {:?} appears more than once", target.name()),
            }
            .into());
        }
    }

    Ok(manifest)
}

impl PublishManifest {
    /// Returns the configured targets, in manifest order.
    pub fn targets(&self) -> &[PlatformTarget] {
        &self.targets
    }

    /// Keeps only the named targets, preserving manifest order.
    ///
    /// # Errors
    ///
    /// Returns a CLI error naming the configured targets when any
    /// requested name is unknown.
    pub fn retain_targets(&mut self, names: &[String]) -> Result<()> {
        for name in names {
            if !self.targets.iter().any(|t| t.name() == name) {
                let known = self
                    .targets
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CliError::InvalidArguments {
                    reason: format!("unknown target {name:?}; configured targets: {known}"),
                }
                .into());
            }
        }

        self.targets.retain(|t| names.iter().any(|n| n == t.name()));
        Ok(())
    }

    /// Resolves the manifest into immutable settings.
    ///
    /// `base_dir` anchors every relative path in the manifest; the
    /// output override, when given, is taken as-is because it came from
    /// the command line and is relative to the caller's directory.
    pub fn into_settings(
        self,
        base_dir: &Path,
        output_override: Option<&Path>,
    ) -> Result<Settings> {
        let file_name = self
            .product
            .file_name
            .unwrap_or_else(|| self.product.name.replace(' ', "-"));

        let output_dir = match output_override {
            Some(dir) => dir.to_path_buf(),
            None => resolve(base_dir, self.output.directory),
        };

        let mut builder = SettingsBuilder::new()
            .product(ProductSettings {
                name: self.product.name,
                file_name,
            })
            .build_tool(BuildToolSettings {
                program: self.build.program,
                args: self.build.args,
                project: resolve(base_dir, self.build.project),
                configuration: self.build.configuration,
                output_name: self.build.output_name,
            })
            .output_directory(output_dir)
            .root_dir(base_dir)
            .targets(self.targets);

        if let Some(macos) = self.macos {
            builder = builder.macos(MacOsSettings {
                bundle_name: macos.bundle_name,
                icon: resolve(base_dir, macos.icon),
                info_plist: resolve(base_dir, macos.info_plist),
            });
        }

        if let Some(docker) = self.docker {
            builder = builder.docker(DockerSettings {
                image: docker.image,
                dockerfile: docker.dockerfile.map(|p| resolve(base_dir, p)),
            });
        }

        Ok(builder.build()?)
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

//! Build tool invocation and publish directory discovery.
//!
//! Runs the configured build tool once per target and locates the
//! publish directory it produced. The tool's own stdout and stderr are
//! inherited so the operator sees compiler output as it happens.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::layout::BuildLayout;
use crate::packager::settings::{
    CONFIGURATION_PLACEHOLDER, PROJECT_PLACEHOLDER, PlatformTarget, RUNTIME_PLACEHOLDER, Settings,
};

/// Renders the argument template for one target.
///
/// Substitutes the runtime, configuration, and project placeholders in
/// every argument. Arguments without placeholders pass through verbatim.
///
/// # Errors
///
/// Returns an error if the project path is not valid UTF-8.
pub fn render_args(settings: &Settings, target: &PlatformTarget) -> Result<Vec<String>> {
    let build = settings.build();
    let project = build
        .project
        .to_str()
        .ok_or_else(|| Error::GenericError("project path is not valid UTF-8".into()))?;

    Ok(build
        .args
        .iter()
        .map(|arg| {
            arg.replace(RUNTIME_PLACEHOLDER, target.runtime())
                .replace(CONFIGURATION_PLACEHOLDER, &build.configuration)
                .replace(PROJECT_PLACEHOLDER, project)
        })
        .collect())
}

/// Runs the build tool for one target and waits for it to finish.
///
/// No timeout is applied; builds take as long as they take.
///
/// # Errors
///
/// Returns [`Error::CommandFailed`] if the tool cannot be spawned and
/// [`Error::BuildFailed`] if it exits unsuccessfully.
pub async fn run_build_tool(settings: &Settings, target: &PlatformTarget) -> Result<()> {
    let program = &settings.build().program;
    let args = render_args(settings, target)?;

    log::debug!("Running {} {}", program, args.join(" "));

    let status = tokio::process::Command::new(program)
        .args(&args)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: program.clone(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::BuildFailed {
            target: target.name().to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

/// Locates the publish directory the build tool wrote for one target.
///
/// The build tool nests its output under a toolchain version directory
/// whose name is not known ahead of time. Exactly one such directory
/// must exist under the release root; zero means the build produced
/// nothing, more than one means stale output from an earlier toolchain
/// is still present and the operator has to clean up before the right
/// directory can be identified.
pub async fn locate_publish_dir(
    settings: &Settings,
    target: &PlatformTarget,
) -> Result<PathBuf> {
    let layout = BuildLayout::new(settings);
    let release_root = layout.release_root();

    let mut read_dir = match tokio::fs::read_dir(&release_root).await {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NoBuildOutput { dir: release_root });
        }
        Err(e) => return Err(e).fs_context("reading release root", &release_root),
    };

    let mut versions: Vec<OsString> = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .fs_context("reading release root", &release_root)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("inspecting release root entry", &entry.path())?;
        if file_type.is_dir() {
            versions.push(entry.file_name());
        }
    }
    versions.sort();

    let version = match versions.as_slice() {
        [] => return Err(Error::NoBuildOutput { dir: release_root }),
        [single] => single,
        _ => {
            return Err(Error::AmbiguousToolchainVersion {
                dir: release_root,
                candidates: versions
                    .iter()
                    .map(|v| v.to_string_lossy().into_owned())
                    .collect(),
            });
        }
    };

    let publish_dir = layout.publish_dir(version, target.runtime());
    let is_dir = tokio::fs::metadata(&publish_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(Error::NoBuildOutput { dir: publish_dir });
    }

    Ok(publish_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{
        BuildToolSettings, ProductSettings, SettingsBuilder, TargetOs,
    };

    fn settings_with_project(project: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .product(ProductSettings {
                name: "App".into(),
                file_name: "App".into(),
            })
            .build_tool(BuildToolSettings {
                program: "dotnet".into(),
                args: BuildToolSettings::default_args(),
                project: project.to_path_buf(),
                configuration: "Release".into(),
                output_name: None,
            })
            .targets(vec![
                PlatformTarget::new("Windows-x64", "win-x64", TargetOs::Windows),
                PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn placeholders_are_substituted_per_target() {
        let settings = settings_with_project(std::path::Path::new("Launcher/App.csproj"));
        let windows = &settings.targets()[0];

        let args = render_args(&settings, windows).unwrap();
        assert_eq!(
            args,
            vec!["publish", "-r", "win-x64", "-c", "Release", "Launcher/App.csproj"]
        );
    }

    #[test]
    fn literal_args_pass_through() {
        let mut build = BuildToolSettings {
            program: "make".into(),
            args: vec!["dist".into(), "RID={runtime}".into()],
            project: PathBuf::from("Makefile"),
            configuration: "Release".into(),
            output_name: Some("app".into()),
        };
        build.args.push("--no-print-directory".into());

        let settings = SettingsBuilder::new()
            .product(ProductSettings {
                name: "App".into(),
                file_name: "App".into(),
            })
            .build_tool(build)
            .targets(vec![PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux)])
            .build()
            .unwrap();

        let args = render_args(&settings, &settings.targets()[0]).unwrap();
        assert_eq!(args, vec!["dist", "RID=linux-x64", "--no-print-directory"]);
    }

    #[tokio::test]
    async fn ambiguous_version_dirs_are_reported_sorted() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = temp.path().join("Launcher/App.csproj");
        let release = temp.path().join("Launcher/bin/Release");
        std::fs::create_dir_all(release.join("net9.0")).unwrap();
        std::fs::create_dir_all(release.join("net8.0")).unwrap();

        let settings = settings_with_project(&project);
        let err = locate_publish_dir(&settings, &settings.targets()[1])
            .await
            .unwrap_err();

        match err {
            Error::AmbiguousToolchainVersion { candidates, .. } => {
                assert_eq!(candidates, vec!["net8.0", "net9.0"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_release_root_is_no_build_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = temp.path().join("Launcher/App.csproj");

        let settings = settings_with_project(&project);
        let err = locate_publish_dir(&settings, &settings.targets()[1])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoBuildOutput { .. }));
    }

    #[tokio::test]
    async fn single_version_dir_resolves_to_publish() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = temp.path().join("Launcher/App.csproj");
        let publish = temp
            .path()
            .join("Launcher/bin/Release/net8.0/linux-x64/publish");
        std::fs::create_dir_all(&publish).unwrap();

        let settings = settings_with_project(&project);
        let found = locate_publish_dir(&settings, &settings.targets()[1])
            .await
            .unwrap();

        assert_eq!(found, publish);
    }
}

//! macOS `.app` bundle assembly.
//!
//! macOS expects applications as a `.app` directory with a fixed inner
//! layout. The publish directory becomes `Contents/MacOS`, the
//! configured icon lands in `Contents/Resources`, and the prepared
//! `Info.plist` is copied in unchanged.

use std::path::{Path, PathBuf};

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::settings::Settings;
use crate::packager::utils::fs;

/// Assembles the `.app` bundle for one macOS target inside `staging_dir`.
///
/// The staging directory afterwards holds exactly one entry, the
/// bundle, so archiving the staging directory yields an archive whose
/// root is `<bundle>.app/`. Stale staging left by a crashed run is
/// removed first.
///
/// # Errors
///
/// Fails if the macOS settings are absent or either input file is
/// missing; both are target failures, not configuration errors, so the
/// rest of the run continues.
pub async fn assemble_bundle(
    settings: &Settings,
    publish_dir: &Path,
    staging_dir: &Path,
) -> Result<PathBuf> {
    let macos = settings.macos().ok_or_else(|| {
        Error::GenericError(
            "macOS bundle inputs are not configured; add a [macos] section with icon and info_plist"
                .into(),
        )
    })?;

    ensure_input("icon", &macos.icon).await?;
    ensure_input("Info.plist", &macos.info_plist).await?;

    let bundle_name = macos
        .bundle_name
        .as_deref()
        .unwrap_or_else(|| settings.product_name());
    let contents = staging_dir
        .join(format!("{bundle_name}.app"))
        .join("Contents");

    fs::remove_dir_all(staging_dir).await?;

    fs::copy_dir(publish_dir, &contents.join("MacOS")).await?;

    let resources = contents.join("Resources");
    tokio::fs::create_dir_all(&resources)
        .await
        .fs_context("creating Resources directory", &resources)?;

    let icon_name = macos.icon.file_name().ok_or_else(|| {
        Error::GenericError(format!(
            "icon path {} has no file name",
            macos.icon.display()
        ))
    })?;
    fs::copy_file(&macos.icon, &resources.join(icon_name)).await?;
    fs::copy_file(&macos.info_plist, &contents.join("Info.plist")).await?;

    log::debug!("Assembled {bundle_name}.app in {}", staging_dir.display());
    Ok(staging_dir.to_path_buf())
}

async fn ensure_input(kind: &'static str, path: &Path) -> Result<()> {
    let is_file = tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if is_file {
        Ok(())
    } else {
        Err(Error::MissingBundleInput {
            kind,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{
        BuildToolSettings, MacOsSettings, PlatformTarget, ProductSettings, SettingsBuilder,
        TargetOs,
    };

    fn macos_settings(root: &Path, bundle_name: Option<&str>) -> Settings {
        let packaging = root.join("packaging");
        std::fs::create_dir_all(&packaging).unwrap();
        std::fs::write(packaging.join("Logo.icns"), b"icns-bytes").unwrap();
        std::fs::write(packaging.join("Info.plist"), "<plist/>").unwrap();

        SettingsBuilder::new()
            .product(ProductSettings {
                name: "Nexus LU Launcher".into(),
                file_name: "Nexus-LU-Launcher".into(),
            })
            .build_tool(BuildToolSettings {
                program: "true".into(),
                args: vec![],
                project: root.join("Launcher/App.csproj"),
                configuration: "Release".into(),
                output_name: None,
            })
            .output_directory(root.join("bin"))
            .targets(vec![PlatformTarget::new("macOS-x64", "osx-x64", TargetOs::MacOs)])
            .macos(MacOsSettings {
                bundle_name: bundle_name.map(String::from),
                icon: packaging.join("Logo.icns"),
                info_plist: packaging.join("Info.plist"),
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn assembles_expected_layout() {
        let temp = tempfile::TempDir::new().unwrap();
        let publish = temp.path().join("publish");
        std::fs::create_dir_all(&publish).unwrap();
        std::fs::write(publish.join("Nexus-LU-Launcher"), "binary").unwrap();
        std::fs::write(publish.join("libcoreclr.dylib"), "lib").unwrap();

        let settings = macos_settings(temp.path(), None);
        let staging = temp.path().join("bin/Nexus-LU-Launcher-macOS-x64");

        assemble_bundle(&settings, &publish, &staging).await.unwrap();

        let contents = staging.join("Nexus LU Launcher.app/Contents");
        assert!(contents.join("MacOS/Nexus-LU-Launcher").is_file());
        assert!(contents.join("MacOS/libcoreclr.dylib").is_file());
        assert!(contents.join("Resources/Logo.icns").is_file());
        assert_eq!(
            std::fs::read_to_string(contents.join("Info.plist")).unwrap(),
            "<plist/>"
        );
    }

    #[tokio::test]
    async fn bundle_name_override_is_used() {
        let temp = tempfile::TempDir::new().unwrap();
        let publish = temp.path().join("publish");
        std::fs::create_dir_all(&publish).unwrap();
        std::fs::write(publish.join("Nexus-LU-Launcher"), "binary").unwrap();

        let settings = macos_settings(temp.path(), Some("Launcher"));
        let staging = temp.path().join("bin/staging");

        assemble_bundle(&settings, &publish, &staging).await.unwrap();

        assert!(staging.join("Launcher.app/Contents/MacOS").is_dir());
    }

    #[tokio::test]
    async fn missing_icon_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        let publish = temp.path().join("publish");
        std::fs::create_dir_all(&publish).unwrap();

        let settings = macos_settings(temp.path(), None);
        std::fs::remove_file(temp.path().join("packaging/Logo.icns")).unwrap();
        let staging = temp.path().join("bin/staging");

        let err = assemble_bundle(&settings, &publish, &staging)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingBundleInput { kind: "icon", .. }));
        assert!(!staging.exists());
    }
}

//! End-to-end packaging tests driving the pipeline with fake build tools.
//!
//! The build tool is a no-op command and the publish directories are
//! seeded up front, so these tests exercise output discovery, cleaning,
//! bundling, and archiving without a real toolchain installed.

#![cfg(unix)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use launcher_publish::packager::{
    BuildToolSettings, MacOsSettings, Packager, PlatformTarget, ProductSettings, Settings,
    SettingsBuilder, TargetOs,
};
use tempfile::TempDir;
use zip::ZipArchive;

/// Isolated project tree with pre-seeded build output.
struct TestProject {
    temp: TempDir,
}

impl TestProject {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn out_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Writes the files the build tool would have produced for one runtime.
    fn seed_publish(&self, runtime: &str, files: &[(&str, &str)]) -> PathBuf {
        let publish = self
            .root()
            .join("App/bin/Release/net8.0")
            .join(runtime)
            .join("publish");
        std::fs::create_dir_all(&publish).unwrap();
        for (name, content) in files {
            let path = publish.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, content).unwrap();
        }
        publish
    }

    /// Settings that run `program` as the build tool with no arguments.
    fn settings(&self, program: &str, targets: Vec<PlatformTarget>) -> Settings {
        self.builder(program, targets).build().unwrap()
    }

    fn builder(&self, program: &str, targets: Vec<PlatformTarget>) -> SettingsBuilder {
        SettingsBuilder::new()
            .product(ProductSettings {
                name: "Product".into(),
                file_name: "Product".into(),
            })
            .build_tool(BuildToolSettings {
                program: program.into(),
                args: vec![],
                project: self.root().join("App/App.csproj"),
                configuration: "Release".into(),
                output_name: None,
            })
            .output_directory(self.out_dir())
            .root_dir(self.root())
            .targets(targets)
    }
}

fn linux_target() -> PlatformTarget {
    PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux)
}

fn windows_target() -> PlatformTarget {
    PlatformTarget::new("Windows-x64", "win-x64", TargetOs::Windows)
}

fn macos_target() -> PlatformTarget {
    PlatformTarget::new("macOS-x64", "osx-x64", TargetOs::MacOs)
}

fn archive_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(String::from).collect()
}

fn zip_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "zip"))
        .count()
}

#[tokio::test]
async fn packages_each_target_with_canonical_names() {
    let project = TestProject::new();
    project.seed_publish(
        "linux-x64",
        &[("App", "elf"), ("App.pdb", "symbols"), ("lib/data.json", "{}")],
    );
    project.seed_publish("win-x64", &[("App.exe", "pe"), ("App.pdb", "symbols")]);

    let settings = project.settings("true", vec![linux_target(), windows_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.artifacts.len(), 2);
    assert_eq!(
        report.artifacts[0].path.file_name().unwrap(),
        "Product-Linux-x64.zip"
    );
    assert_eq!(
        report.artifacts[1].path.file_name().unwrap(),
        "Product-Windows-x64.zip"
    );

    let linux_names = archive_names(&report.artifacts[0].path);
    assert!(linux_names.contains(&"Product".to_string()));
    assert!(linux_names.contains(&"lib/data.json".to_string()));
    assert!(!linux_names.iter().any(|n| n.contains("App")));
    assert!(!linux_names.iter().any(|n| n.ends_with(".pdb")));

    let windows_names = archive_names(&report.artifacts[1].path);
    assert!(windows_names.contains(&"Product.exe".to_string()));
    assert!(!windows_names.iter().any(|n| n.ends_with(".pdb")));
}

#[tokio::test]
async fn failed_build_is_skipped_not_fatal() {
    let project = TestProject::new();
    project.seed_publish("linux-x64", &[("App", "elf")]);

    let settings = project.settings("false", vec![linux_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("build tool exited"));
    assert_eq!(zip_count(&project.out_dir()), 0);
}

#[tokio::test]
async fn missing_build_output_is_skipped() {
    let project = TestProject::new();

    let settings = project.settings("true", vec![linux_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("no build output"));
}

#[tokio::test]
async fn one_bad_target_does_not_stop_the_rest() {
    let project = TestProject::new();
    project.seed_publish("linux-x64", &[("App", "elf")]);

    let settings = project.settings("true", vec![windows_target(), linux_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].target.name(), "Windows-x64");
    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].target.name(), "Linux-x64");
}

#[tokio::test]
async fn rerun_produces_identical_archives_and_clears_stale_files() {
    let project = TestProject::new();
    project.seed_publish("linux-x64", &[("App", "elf"), ("App.pdb", "symbols")]);

    let settings = project.settings("true", vec![linux_target()]);
    let packager = Packager::new(settings);

    let first = packager.run().await.unwrap();
    assert!(first.is_complete());
    let first_bytes = std::fs::read(&first.artifacts[0].path).unwrap();

    std::fs::write(project.out_dir().join("stale.zip"), "junk").unwrap();

    // The executable was already renamed by the first run; the second
    // run has to accept the canonical name as-is.
    let second = packager.run().await.unwrap();
    assert!(second.is_complete());
    let second_bytes = std::fs::read(&second.artifacts[0].path).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert!(!project.out_dir().join("stale.zip").exists());
}

#[tokio::test]
async fn stale_toolchain_directories_fail_the_target() {
    let project = TestProject::new();
    project.seed_publish("linux-x64", &[("App", "elf")]);
    std::fs::create_dir_all(project.root().join("App/bin/Release/net9.0")).unwrap();

    let settings = project.settings("true", vec![linux_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(report.skipped.len(), 1);
    let reason = &report.skipped[0].reason;
    assert!(reason.contains("net8.0"));
    assert!(reason.contains("net9.0"));
}

#[tokio::test]
async fn macos_archive_contains_app_bundle() {
    let project = TestProject::new();
    project.seed_publish("osx-x64", &[("App", "macho")]);

    let icon = project.root().join("Logo.icns");
    std::fs::write(&icon, "icns").unwrap();
    let plist = project.root().join("Info.plist");
    std::fs::write(&plist, "<plist/>").unwrap();

    let settings = project
        .builder("true", vec![macos_target()])
        .macos(MacOsSettings {
            bundle_name: None,
            icon,
            info_plist: plist,
        })
        .build()
        .unwrap();
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.is_complete());
    let archive_path = &report.artifacts[0].path;
    let names = archive_names(archive_path);
    assert!(names.contains(&"Product.app/Contents/MacOS/Product".to_string()));
    assert!(names.contains(&"Product.app/Contents/Resources/Logo.icns".to_string()));
    assert!(names.contains(&"Product.app/Contents/Info.plist".to_string()));

    // Staging directory is gone once the archive exists
    assert!(!project.out_dir().join("Product-macOS-x64").exists());

    let mut archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut plist_entry = archive.by_name("Product.app/Contents/Info.plist").unwrap();
    let mut contents = String::new();
    plist_entry.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "<plist/>");
}

#[tokio::test]
async fn macos_target_without_bundle_inputs_is_skipped() {
    let project = TestProject::new();
    project.seed_publish("osx-x64", &[("App", "macho")]);

    let settings = project.settings("true", vec![macos_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("bundle inputs"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn glibc_note_records_the_host_floor() {
    let project = TestProject::new();
    project.seed_publish("linux-x64", &[("App", "elf")]);

    let settings = project.settings("true", vec![linux_target()]);
    let report = Packager::new(settings).run().await.unwrap();

    // Hosts without a readable glibc version record nothing
    if let Some(note) = report.glibc_note {
        let text = std::fs::read_to_string(note).unwrap();
        assert!(text.starts_with("glibc "));
    }
}

//! Path construction for build outputs and published artifacts.
//!
//! Every path the pipeline touches is derived here so naming rules live
//! in one place instead of being re-concatenated at each call site.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::packager::settings::{PlatformTarget, Settings};

/// Paths inside the output directory that receives finished artifacts.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    file_name: String,
}

impl OutputLayout {
    /// Creates the layout for a settings instance.
    pub fn new(settings: &Settings) -> Self {
        Self {
            root: settings.output_dir().to_path_buf(),
            file_name: settings.file_name().to_string(),
        }
    }

    /// Returns the output directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the archive path for a target: `<file_name>-<target name>.zip`.
    pub fn archive_path(&self, target: &PlatformTarget) -> PathBuf {
        self.root
            .join(format!("{}-{}.zip", self.file_name, target.name()))
    }

    /// Returns the bundle staging directory for a target.
    ///
    /// Shares the archive's stem so a crashed run leaves an obviously
    /// matching directory next to the missing archive.
    pub fn staging_dir(&self, target: &PlatformTarget) -> PathBuf {
        self.root
            .join(format!("{}-{}", self.file_name, target.name()))
    }

    /// Returns the path of the glibc version note.
    pub fn glibc_note_path(&self) -> PathBuf {
        self.root.join("glibc-version.txt")
    }
}

/// Paths inside the build tool's output tree.
///
/// The build tool writes to
/// `<project dir>/bin/<configuration>/<toolchain version>/<runtime>/publish`;
/// the toolchain version directory is discovered at run time.
#[derive(Debug, Clone)]
pub struct BuildLayout {
    project_dir: PathBuf,
    configuration: String,
}

impl BuildLayout {
    /// Creates the layout for a settings instance.
    pub fn new(settings: &Settings) -> Self {
        let project = settings.build().project.as_path();
        let project_dir = match project.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            project_dir,
            configuration: settings.build().configuration.clone(),
        }
    }

    /// Returns the directory holding one subdirectory per toolchain version.
    pub fn release_root(&self) -> PathBuf {
        self.project_dir.join("bin").join(&self.configuration)
    }

    /// Returns the publish directory for a toolchain version and runtime.
    pub fn publish_dir(&self, toolchain_version: &OsStr, runtime: &str) -> PathBuf {
        self.release_root()
            .join(toolchain_version)
            .join(runtime)
            .join("publish")
    }
}

//! Main packaging orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that runs the
//! per-target pipeline: build, locate output, clean, bundle, archive,
//! checksum.

use std::path::PathBuf;

use crate::packager::{
    PackagedArtifact, Result, RunReport, Settings, SkippedTarget, archive, build, checksum, clean,
    host,
    layout::OutputLayout,
    platform,
    settings::PlatformTarget,
    utils::fs,
};

/// Main packaging orchestrator.
///
/// Coordinates one publish run over the configured targets, strictly in
/// order and one at a time. A failing target is skipped and reported;
/// it never aborts the run.
///
/// # Examples
///
/// ```no_run
/// use launcher_publish::packager::{Packager, Settings};
///
/// # async fn example(settings: Settings) -> launcher_publish::packager::Result<()> {
/// let packager = Packager::new(settings);
/// let report = packager.run().await?;
/// println!(
///     "{} archives, {} targets skipped",
///     report.artifacts.len(),
///     report.skipped.len()
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a new packager with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns startup warnings about the host environment.
    ///
    /// Always includes the host-dependent cross-publishing note; adds a
    /// build tool warning when the configured program is not on `PATH`.
    /// Warnings never stop a run.
    pub fn preflight(&self) -> Vec<String> {
        let mut warnings = vec![host::permission_note().to_string()];

        let program = &self.settings.build().program;
        if !host::build_tool_available(program) {
            warnings.push(format!(
                "{program} was not found on PATH; every build will fail until it is installed"
            ));
        }

        warnings
    }

    /// Deletes and recreates the output directory.
    ///
    /// Runs once at the start so stale archives from earlier runs can
    /// never survive into this one.
    pub async fn reset_output(&self) -> Result<()> {
        let layout = OutputLayout::new(&self.settings);
        fs::reset_dir(layout.root()).await?;
        log::debug!("Reset output directory {}", layout.root().display());
        Ok(())
    }

    /// Runs the full pipeline for one target and returns its artifact.
    ///
    /// Steps: invoke the build tool, locate the publish directory, strip
    /// debug symbols, canonicalize the executable name, bundle (macOS
    /// only), archive, checksum. Any error means the target produced no
    /// artifact; the caller decides whether to skip or abort.
    pub async fn package_target(&self, target: &PlatformTarget) -> Result<PackagedArtifact> {
        build::run_build_tool(&self.settings, target).await?;

        let publish_dir = build::locate_publish_dir(&self.settings, target).await?;

        let removed = clean::strip_debug_symbols(&publish_dir).await?;
        if removed > 0 {
            log::debug!("Removed {removed} debug symbol file(s) for {}", target.name());
        }

        clean::canonicalize_executable(
            &publish_dir,
            self.settings.tool_output_name(),
            self.settings.file_name(),
        )
        .await?;

        let layout = OutputLayout::new(&self.settings);
        let archive_path = layout.archive_path(target);

        if target.is_macos() {
            let staging = layout.staging_dir(target);
            let result = self
                .bundle_and_archive(&publish_dir, &staging, &archive_path)
                .await;
            if result.is_err() {
                let _ = fs::remove_dir_all(&staging).await;
            }
            result?;
        } else {
            archive::zip_dir(&publish_dir, &archive_path).await?;
        }

        let size = tokio::fs::metadata(&archive_path)
            .await
            .map(|m| m.len())
            .map_err(crate::packager::Error::IoError)?;
        let sha256 = checksum::file_sha256(&archive_path).await?;

        Ok(PackagedArtifact {
            target: target.clone(),
            path: archive_path,
            size,
            sha256,
        })
    }

    /// Assembles the macOS bundle in staging, archives it, and removes
    /// the staging directory again.
    async fn bundle_and_archive(
        &self,
        publish_dir: &std::path::Path,
        staging: &std::path::Path,
        archive_path: &std::path::Path,
    ) -> Result<PathBuf> {
        platform::macos::assemble_bundle(&self.settings, publish_dir, staging).await?;
        let path = archive::zip_dir(staging, archive_path).await?;
        fs::remove_dir_all(staging).await?;
        Ok(path)
    }

    /// Writes the glibc floor note into the output directory.
    ///
    /// No-op on hosts without a detectable glibc.
    pub async fn write_glibc_note(&self) -> Result<Option<PathBuf>> {
        let layout = OutputLayout::new(&self.settings);
        host::write_glibc_note(&layout.glibc_note_path()).await
    }

    /// Executes the whole publish run and returns its report.
    ///
    /// Resets the output directory, packages every configured target in
    /// order, and records the glibc note. Per-target failures are
    /// collected as skipped targets; only environment-level failures
    /// (for example an output directory that cannot be recreated)
    /// propagate as errors.
    pub async fn run(&self) -> Result<RunReport> {
        for warning in self.preflight() {
            log::warn!("{warning}");
        }

        self.reset_output().await?;

        let mut artifacts = Vec::new();
        let mut skipped = Vec::new();

        for target in self.settings.targets() {
            log::info!(
                "Exporting {} for {}",
                self.settings.product_name(),
                target.name()
            );
            match self.package_target(target).await {
                Ok(artifact) => {
                    log::info!("Created {}", artifact.path.display());
                    artifacts.push(artifact);
                }
                Err(e) => {
                    log::warn!(
                        "Build for {} failed and will not be packaged: {e}",
                        target.name()
                    );
                    skipped.push(SkippedTarget {
                        target: target.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let glibc_note = match self.write_glibc_note().await {
            Ok(note) => note,
            Err(e) => {
                log::warn!("Could not record the glibc version: {e}");
                None
            }
        };

        Ok(RunReport::new(artifacts, skipped, glibc_note))
    }
}

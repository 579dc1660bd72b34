//! Host publish mode: the full per-target packaging loop.
//!
//! Drives [`Packager`] one target at a time with operator-facing
//! status lines. A failing target is warned about and skipped; the run
//! itself still exits successfully so release scripts can inspect the
//! summary instead of dying mid-way. When the JSON summary is
//! requested, stdout carries nothing but the report.

use crate::cli::OutputManager;
use crate::cli::summary::{self, SummaryFormat};
use crate::error::Result;
use crate::packager::{Packager, RunReport, Settings, SkippedTarget};

/// Runs the publish pipeline for every target in the settings.
pub async fn run(settings: Settings, output: &OutputManager, format: SummaryFormat) -> Result<i32> {
    let packager = Packager::new(settings);

    for warning in packager.preflight() {
        output.warn(&warning);
    }

    packager.reset_output().await?;
    if !format.is_json() {
        output.verbose(&format!(
            "Output directory ready at {}",
            packager.settings().output_dir().display()
        ));
    }

    let mut artifacts = Vec::new();
    let mut skipped = Vec::new();

    for target in packager.settings().targets() {
        if !format.is_json() {
            output.progress(&format!(
                "Exporting {} for {}",
                packager.settings().product_name(),
                target.name()
            ));
            output.verbose(&format!(
                "Runtime {}, {} packaging rules",
                target.runtime(),
                target.os()
            ));
        }

        match packager.package_target(target).await {
            Ok(artifact) => {
                if !format.is_json() {
                    output.success(&format!("Created {}", artifact.path.display()));
                }
                artifacts.push(artifact);
            }
            Err(e) => {
                output.warn(&format!(
                    "Build for {} failed and will not be packaged: {e}",
                    target.name()
                ));
                skipped.push(SkippedTarget {
                    target: target.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let glibc_note = match packager.write_glibc_note().await {
        Ok(note) => note,
        Err(e) => {
            output.warn(&format!("Could not record the glibc version: {e}"));
            None
        }
    };

    let report = RunReport::new(artifacts, skipped, glibc_note);
    summary::render(&report, output, format)?;

    Ok(0)
}

//! End-of-run summary rendering.
//!
//! The run report is printed once all targets have been attempted,
//! either as human-readable text or as JSON for release automation.

use clap::ValueEnum;

use super::output::{OutputManager, format_bytes, truncate_hash};
use crate::error::Result;
use crate::packager::RunReport;

/// How the end-of-run summary is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable status lines
    #[default]
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

impl SummaryFormat {
    /// Returns true for the JSON format.
    pub fn is_json(self) -> bool {
        matches!(self, SummaryFormat::Json)
    }
}

/// Prints the run report in the requested format.
///
/// JSON goes straight to stdout regardless of quiet mode so automation
/// can rely on it; the text rendering respects the output manager's
/// gating.
pub fn render(report: &RunReport, output: &OutputManager, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        SummaryFormat::Text => {
            render_text(report, output);
        }
    }
    Ok(())
}

fn render_text(report: &RunReport, output: &OutputManager) {
    output.section("Summary");

    if report.artifacts.is_empty() {
        output.info("No archives were produced");
    }

    for artifact in &report.artifacts {
        output.success(&format!(
            "{} ({}, sha256 {})",
            artifact.path.display(),
            format_bytes(artifact.size),
            truncate_hash(&artifact.sha256)
        ));
    }

    for skipped in &report.skipped {
        output.warn(&format!("{} skipped: {}", skipped.target, skipped.reason));
    }

    if let Some(note) = &report.glibc_note {
        output.info(&format!("glibc note written to {}", note.display()));
    }

    if report.is_complete() {
        output.info("All targets packaged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::{PackagedArtifact, PlatformTarget, SkippedTarget, TargetOs};

    #[test]
    fn report_serializes_to_json() {
        let report = RunReport::new(
            vec![PackagedArtifact {
                target: PlatformTarget::new("Linux-x64", "linux-x64", TargetOs::Linux),
                path: "bin/App-Linux-x64.zip".into(),
                size: 1024,
                sha256: "ab".repeat(32),
            }],
            vec![SkippedTarget {
                target: PlatformTarget::new("macOS-x64", "osx-x64", TargetOs::MacOs),
                reason: "no build output".into(),
            }],
            None,
        );

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"Linux-x64\""));
        assert!(json.contains("\"no build output\""));
        assert!(json.contains("\"finished_at\""));
    }

    #[test]
    fn format_flag_values_parse() {
        assert!(SummaryFormat::Text == SummaryFormat::default());
        assert!(SummaryFormat::Json.is_json());
        assert!(!SummaryFormat::Text.is_json());
    }
}

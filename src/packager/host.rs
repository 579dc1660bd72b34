//! Host environment checks.
//!
//! Cross-publishing from one OS for all of them has known limitations
//! that depend only on the host: permission bits and console subsystem
//! flags cannot be set for the other side. These checks produce the
//! warnings and notes that make those limitations visible.

use std::path::{Path, PathBuf};

use crate::packager::error::{ErrorExt, Result};

/// Returns the host-dependent limitation note shown at the start of a run.
pub fn permission_note() -> &'static str {
    if cfg!(windows) {
        "The Linux and macOS binaries will be missing the permissions required to run."
    } else {
        "The Windows binaries will open a console window when launched."
    }
}

/// Returns true if the configured build tool resolves on `PATH`.
pub fn build_tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Queries the host's glibc version, on Linux hosts only.
///
/// Linux binaries built here will not run on distributions with an
/// older glibc, so the floor is worth recording next to the artifacts.
/// Tries `getconf GNU_LIBC_VERSION` first and falls back to
/// `ldd --version`; returns None when neither answers.
pub async fn glibc_version() -> Option<String> {
    if !cfg!(target_os = "linux") {
        return None;
    }

    if let Ok(output) = tokio::process::Command::new("getconf")
        .arg("GNU_LIBC_VERSION")
        .output()
        .await
    {
        if output.status.success() {
            if let Some(version) = parse_getconf(&String::from_utf8_lossy(&output.stdout)) {
                return Some(version);
            }
        }
    }

    if let Ok(output) = tokio::process::Command::new("ldd")
        .arg("--version")
        .output()
        .await
    {
        if output.status.success() {
            if let Some(version) = parse_ldd(&String::from_utf8_lossy(&output.stdout)) {
                return Some(version);
            }
        }
    }

    None
}

/// Writes the glibc floor note, returning its path when one was written.
///
/// Hosts without a detectable glibc (or non-Linux hosts) write nothing
/// and return Ok(None).
pub async fn write_glibc_note(path: &Path) -> Result<Option<PathBuf>> {
    let Some(version) = glibc_version().await else {
        return Ok(None);
    };

    tokio::fs::write(path, format!("glibc {version}\n"))
        .await
        .fs_context("writing glibc note", path)?;
    Ok(Some(path.to_path_buf()))
}

/// Parses `getconf GNU_LIBC_VERSION` output, e.g. "glibc 2.35".
fn parse_getconf(output: &str) -> Option<String> {
    let trimmed = output.trim();
    if let Some(version) = trimmed.strip_prefix("glibc ") {
        return Some(version.to_string());
    }
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses the first line of `ldd --version`, taking the trailing
/// version number, e.g. "ldd (Ubuntu GLIBC 2.35-0ubuntu3.8) 2.35".
fn parse_ldd(output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    let last = first_line.split_whitespace().last()?;
    last.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
        .then(|| last.to_string())
}

//! Publish directory cleanup.
//!
//! After a successful build the publish directory still carries debug
//! symbol files and an executable named after the project rather than
//! the product. Both are fixed here before the directory is archived.

use std::path::{Path, PathBuf};

use crate::packager::error::{Error, ErrorExt, Result};

/// File extension of debug symbol files, without the dot.
pub const DEBUG_SYMBOL_EXTENSION: &str = "pdb";

/// Removes debug symbol files from the publish directory.
///
/// Sweeps the whole tree so no `.pdb` file can survive into an archive,
/// wherever the build tool placed it. Returns the number of files
/// removed.
pub async fn strip_debug_symbols(dir: &Path) -> Result<usize> {
    let mut doomed = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(DEBUG_SYMBOL_EXTENSION)
        {
            doomed.push(entry.into_path());
        }
    }

    for path in &doomed {
        tokio::fs::remove_file(path)
            .await
            .fs_context("removing debug symbols", path)?;
        log::debug!("Removed {}", path.display());
    }

    Ok(doomed.len())
}

/// Renames the build tool's executable to the canonical product name.
///
/// The executable suffix is preserved: `App.exe` becomes `Product.exe`,
/// suffix-less `App` becomes `Product`. A leftover executable already
/// carrying the canonical name is replaced, and a build tool that emits
/// the canonical name directly is accepted as-is.
///
/// Returns the path of the canonical executable.
///
/// # Errors
///
/// Returns [`Error::NoUsableExecutable`] if the directory holds neither
/// a tool-named nor a canonical executable. An empty publish directory
/// fails the same way.
pub async fn canonicalize_executable(
    dir: &Path,
    tool_name: &str,
    canonical: &str,
) -> Result<PathBuf> {
    for suffix in ["", ".exe"] {
        let tool = dir.join(format!("{tool_name}{suffix}"));
        let canon = dir.join(format!("{canonical}{suffix}"));

        if is_file(&tool).await {
            if tool_name != canonical {
                if is_file(&canon).await {
                    tokio::fs::remove_file(&canon)
                        .await
                        .fs_context("removing stale executable", &canon)?;
                }
                tokio::fs::rename(&tool, &canon)
                    .await
                    .fs_context("renaming executable", &tool)?;
            }
            return Ok(canon);
        }
    }

    // No tool-named executable: accept one already carrying the canonical name
    for suffix in ["", ".exe"] {
        let canon = dir.join(format!("{canonical}{suffix}"));
        if is_file(&canon).await {
            return Ok(canon);
        }
    }

    Err(Error::NoUsableExecutable {
        dir: dir.to_path_buf(),
        expected: tool_name.to_string(),
    })
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

//! File system helpers shared by the packaging pipeline.
//!
//! Output and staging directories are rebuilt from scratch on every run, so
//! the operations here are written to succeed no matter what a previous run
//! left behind. Recursive copies preserve symlinks and run on the blocking
//! thread pool.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::packager::error::{Error, ErrorExt, Result};

/// Replaces `path` with an empty directory, deleting any previous contents.
pub async fn reset_dir(path: &Path) -> Result<()> {
    remove_dir_all(path).await?;
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes a directory tree, treating an already-absent path as success.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a single regular file, creating the destination's parents.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let meta = fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?;
    if !meta.is_file() {
        return Err(Error::GenericError(format!(
            "{} is not a regular file",
            from.display()
        )));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    fs::copy(from, to).await.fs_context("copying", from)?;
    Ok(())
}

/// Recursively copies a directory tree, creating the destination's parents.
///
/// Symlinks are recreated as symlinks rather than followed, so relative
/// links inside build output stay valid after the copy.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    let meta = fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?;
    if !meta.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }
        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let dest = to.join(entry.path().strip_prefix(&from)?);
            copy_entry(&entry, &dest)?;
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("directory copy task panicked: {e}")))?
}

fn copy_entry(entry: &walkdir::DirEntry, dest: &Path) -> Result<()> {
    let src = entry.path();
    if entry.file_type().is_symlink() {
        let target = std::fs::read_link(src).fs_context("reading symlink", src)?;
        // WalkDir does not follow links, so is_dir() here reflects the target.
        make_symlink(&target, dest, src.is_dir()).fs_context("creating symlink", dest)?;
    } else if entry.file_type().is_dir() {
        std::fs::create_dir_all(dest).fs_context("creating directory", dest)?;
    } else {
        std::fs::copy(src, dest).fs_context("copying", src)?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, dest: &Path, _links_to_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(windows)]
fn make_symlink(target: &Path, dest: &Path, links_to_dir: bool) -> io::Result<()> {
    if links_to_dir {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    }
}

//! Zip archive creation for published targets.
//!
//! Archives are deterministic: entries are added in sorted order with a
//! fixed timestamp, so packaging the same tree twice yields the same
//! bytes. A failed archive is deleted rather than left half-written.

use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::packager::error::{Error, Result};

/// Archives the contents of `src_dir` into a zip file at `dest`.
///
/// Entry names are relative to `src_dir` with forward slashes, so the
/// archive root holds the directory's contents, not the directory
/// itself. Unix permission bits are recorded where available.
///
/// Runs on the blocking thread pool; compression of large publish
/// directories is CPU-bound work.
pub async fn zip_dir(src_dir: &Path, dest: &Path) -> Result<PathBuf> {
    let src = src_dir.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || write_archive(&src, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("archive task panicked: {}", e)))?
}

fn write_archive(src: &Path, dest: &Path) -> Result<PathBuf> {
    let file = std::fs::File::create(dest)?;
    let mut writer = zip::ZipWriter::new(file);

    let result = append_tree(&mut writer, src).and_then(|()| {
        writer.finish()?;
        Ok(())
    });

    match result {
        Ok(()) => Ok(dest.to_path_buf()),
        Err(e) => {
            // Never leave a partial archive behind
            let _ = std::fs::remove_file(dest);
            Err(e)
        }
    }
}

fn append_tree(writer: &mut zip::ZipWriter<std::fs::File>, src: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let name = rel
            .to_str()
            .ok_or_else(|| {
                Error::GenericError(format!("path {} is not valid UTF-8", rel.display()))
            })?
            .replace('\\', "/");

        let options = entry_options(&entry)?;

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut file = std::fs::File::open(entry.path())?;
            std::io::copy(&mut file, writer)?;
        }
    }

    Ok(())
}

/// Fixed-timestamp options so rebuilt archives are byte-identical.
fn entry_options(entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = entry.metadata()?.permissions().mode();
        Ok(options.unix_permissions(mode))
    }

    #[cfg(not(unix))]
    {
        let _ = entry;
        Ok(options)
    }
}

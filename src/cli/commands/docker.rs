//! Containerized publish mode.
//!
//! Builds the Linux release inside Docker so the artifacts carry the
//! glibc floor of the build image rather than the host, then copies
//! them out of the image and re-owns them for the invoking user. The
//! image's Dockerfile is expected to leave finished artifacts in
//! `/build/bin`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use crate::packager::{Error as PackagingError, Settings, utils::fs};

/// Runs the containerized publish: build the image, export artifacts,
/// re-own them.
pub async fn run(settings: &Settings, output: &OutputManager) -> Result<i32> {
    let dockerfile = select_dockerfile(settings)?;
    let image = settings.docker_image();

    output.progress(&format!(
        "Building image {image} from {}",
        dockerfile.display()
    ));

    fs::reset_dir(settings.output_dir()).await?;

    build_image(settings, &dockerfile, &image, output).await?;
    export_artifacts(settings, &image, output).await?;
    reown_artifacts(settings.output_dir(), output).await;

    output.success(&format!(
        "Artifacts collected in {}",
        settings.output_dir().display()
    ));
    Ok(0)
}

/// Picks the Dockerfile for this host.
///
/// Only Linux hosts can run the containerized build; anything else is a
/// fatal error rather than a skip, because there is nothing left to do.
fn select_dockerfile(settings: &Settings) -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        Ok(settings.dockerfile())
    } else {
        Err(PackagingError::UnsupportedHost {
            os: std::env::consts::OS.to_string(),
        }
        .into())
    }
}

async fn build_image(
    settings: &Settings,
    dockerfile: &Path,
    image: &str,
    output: &OutputManager,
) -> Result<()> {
    let dockerfile = dockerfile.to_str().ok_or_else(|| {
        PackagingError::GenericError("Dockerfile path is not valid UTF-8".into())
    })?;

    let args = vec![
        "build".to_string(),
        "-f".to_string(),
        dockerfile.to_string(),
        "-t".to_string(),
        image.to_string(),
        ".".to_string(),
    ];

    let status = stream_command("docker", &args, settings.root_dir(), output).await?;
    if !status.success() {
        return Err(CliError::ExecutionFailed {
            command: "docker build".to_string(),
            reason: format!("exited with status {:?}", status.code()),
        }
        .into());
    }

    Ok(())
}

async fn export_artifacts(
    settings: &Settings,
    image: &str,
    output: &OutputManager,
) -> Result<()> {
    // Docker volume mounts need an absolute host path
    let host_dir = tokio::fs::canonicalize(settings.output_dir()).await?;

    let args = vec![
        "run".to_string(),
        "--rm".to_string(),
        "-v".to_string(),
        format!("{}:/publish", host_dir.display()),
        image.to_string(),
        "cp".to_string(),
        "-a".to_string(),
        "/build/bin/.".to_string(),
        "/publish/".to_string(),
    ];

    output.progress("Exporting artifacts from the build image");
    let status = stream_command("docker", &args, settings.root_dir(), output).await?;
    if !status.success() {
        return Err(CliError::ExecutionFailed {
            command: "docker run".to_string(),
            reason: format!("exited with status {:?}", status.code()),
        }
        .into());
    }

    Ok(())
}

/// Hands the exported files back to the invoking user.
///
/// Docker writes them as root; under sudo the files should belong to
/// the user who ran the command. A failed chown is only a warning, the
/// artifacts themselves are fine.
async fn reown_artifacts(dir: &Path, output: &OutputManager) {
    #[cfg(unix)]
    {
        let owner = std::env::var("SUDO_USER").unwrap_or_else(|_| {
            format!("{}:{}", users::get_current_uid(), users::get_current_gid())
        });

        match Command::new("chown")
            .arg("-R")
            .arg(&owner)
            .arg(dir)
            .status()
            .await
        {
            Ok(status) if status.success() => {}
            Ok(status) => output.warn(&format!(
                "chown of {} exited with status {:?}",
                dir.display(),
                status.code()
            )),
            Err(e) => output.warn(&format!("could not re-own {}: {e}", dir.display())),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (dir, output);
    }
}

/// Spawns a command and streams both pipes through the output manager.
async fn stream_command(
    program: &str,
    args: &[String],
    current_dir: &Path,
    output: &OutputManager,
) -> Result<std::process::ExitStatus> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(current_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CliError::ExecutionFailed {
            command: format!("{program} {}", args.join(" ")),
            reason: e.to_string(),
        })?;

    // Drain both streams concurrently so neither pipe can fill and stall
    tokio::join!(
        async {
            if let Some(stdout) = child.stdout.take() {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    output.indent(&line);
                }
            }
        },
        async {
            if let Some(stderr) = child.stderr.take() {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    output.indent(&line);
                }
            }
        }
    );

    child.wait().await.map_err(|e| {
        CliError::ExecutionFailed {
            command: program.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

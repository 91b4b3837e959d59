//! Release archive download and binary installation.

use std::path::PathBuf;

use crate::application::ports::{CommandRunner, HttpFetcher, LocalFs, ProgressReporter, Storage};
use crate::domain::arch::{archive_file_name, release_url};
use crate::domain::{Arch, InstallerConfig, StepError};

use super::utf8;

/// A downloaded release archive.
#[derive(Debug, Clone)]
pub struct FetchedArchive {
    pub url: String,
    pub path: PathBuf,
    pub sha256: String,
}

/// Download the versioned release archive into the work directory.
///
/// A stale file with the same name is removed first. There is no retry.
///
/// # Errors
///
/// `Fetch` when the download fails or leaves no (or an empty) file.
pub async fn fetch(
    fs: &impl LocalFs,
    net: &impl HttpFetcher,
    config: &InstallerConfig,
    arch: Arch,
    reporter: &impl ProgressReporter,
) -> Result<FetchedArchive, StepError> {
    let version = config.version.trim_start_matches('v');
    let url = release_url(&config.release_url, version, arch);
    let dest = config.paths.work_dir.join(archive_file_name(&url));

    fs.create_dir_all(&config.paths.work_dir)?;
    if fs.exists(&dest) {
        tracing::debug!(path = %dest.display(), "removing stale archive");
        fs.remove_file(&dest)?;
    }

    reporter.step(&format!(
        "downloading {} v{version} ({arch})...",
        config.binary_name
    ));
    tracing::debug!(%url, dest = %dest.display(), "downloading release archive");
    download_nonempty(fs, net, &url, &dest, config).await?;

    let sha256 = fs.sha256_file(&dest)?;
    tracing::info!(%url, %sha256, "release archive downloaded");
    reporter.success(&format!("downloaded {}", archive_file_name(&url)));
    Ok(FetchedArchive {
        url,
        path: dest,
        sha256,
    })
}

/// Download `url` to `dest` and require a non-empty file afterwards.
pub(super) async fn download_nonempty(
    fs: &impl LocalFs,
    net: &impl HttpFetcher,
    url: &str,
    dest: &std::path::Path,
    config: &InstallerConfig,
) -> Result<(), StepError> {
    let fetch_err = |reason: String| StepError::Fetch {
        url: url.to_string(),
        reason,
    };
    net.download(url, dest, config.download_timeout())
        .await
        .map_err(|e| fetch_err(format!("{e:#}")))?;
    match fs.file_size(dest) {
        Some(0) => Err(fetch_err("downloaded file is empty".to_string())),
        Some(_) => Ok(()),
        None => Err(fetch_err(format!("{} was not created", dest.display()))),
    }
}

/// Unpack the archive, move the collector into place, and check it runs.
///
/// Nothing is written to the binary path unless the archive contains
/// `config.binary_name` at its top level. The unpack directory is removed on
/// every path.
///
/// Returns the first line of `<binary> --version`.
///
/// # Errors
///
/// `ArtifactIntegrity` when the archive cannot be unpacked, lacks the binary,
/// or the installed binary fails its version query.
pub async fn install(
    runner: &impl CommandRunner,
    fs: &impl Storage,
    config: &InstallerConfig,
    archive: &FetchedArchive,
    reporter: &impl ProgressReporter,
) -> Result<String, StepError> {
    let paths = &config.paths;
    fs.create_dir_all(&paths.work_dir)?;
    let scratch = fs.scratch_dir(&paths.work_dir, &format!("{}-unpack-", config.binary_name))?;
    let unpack_dir = scratch.path();

    fs.unpack(&archive.path, unpack_dir).await.map_err(|e| {
        StepError::ArtifactIntegrity(format!("cannot unpack {}: {e:#}", archive.path.display()))
    })?;

    let extracted = unpack_dir.join(&config.binary_name);
    if !fs.exists(&extracted) {
        return Err(StepError::ArtifactIntegrity(format!(
            "{} not found in {}",
            config.binary_name,
            archive_file_name(&archive.url)
        )));
    }

    if let Some(parent) = paths.binary.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.move_file(&extracted, &paths.binary)?;
    fs.set_permissions(&paths.binary, 0o755)?;
    fs.remove_file(&archive.path)?;
    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "could not remove unpack directory");
    }
    tracing::info!(binary = %paths.binary.display(), "collector binary installed");

    let binary = utf8(&paths.binary)?;
    let output = runner.run(binary, &["--version"]).await.map_err(|e| {
        StepError::ArtifactIntegrity(format!("cannot execute {binary}: {e:#}"))
    })?;
    if !output.status.success() {
        return Err(StepError::ArtifactIntegrity(format!(
            "{binary} --version exited with {}",
            output.status
        )));
    }
    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    reporter.success(&format!("installed {binary} ({version})"));
    Ok(version)
}

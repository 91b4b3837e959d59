//! `.tar.gz` extraction for release archives.

use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use crate::application::ports::ArchiveUnpacker;
use crate::infra::fs::HostFs;

impl ArchiveUnpacker for HostFs {
    async fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
        let archive = archive.to_path_buf();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || unpack_tar_gz(&archive, &dest))
            .await
            .context("spawn_blocking for unpack")?
    }
}

/// Unpack a gzip-compressed tarball into `dest`.
///
/// `tar::Archive::unpack` refuses entries that escape `dest` (absolute paths
/// or `..` components).
///
/// # Errors
///
/// Returns an error if the file is not a readable gzip tarball.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::open(archive)
        .with_context(|| format!("opening {}", archive.display()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.set_preserve_permissions(true);
    tar.unpack(dest)
        .with_context(|| format!("extracting {} into {}", archive.display(), dest.display()))
}

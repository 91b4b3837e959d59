//! HTTP downloads via `ureq`, run on the blocking pool.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::HttpFetcher;
use crate::domain::MetadataConfig;

/// Production network adapter: release/template downloads and the
/// instance-metadata probe.
#[derive(Debug, Clone)]
pub struct UreqNetwork {
    pub(crate) metadata: MetadataConfig,
}

impl UreqNetwork {
    #[must_use]
    pub fn new(metadata: MetadataConfig) -> Self {
        Self { metadata }
    }
}

impl HttpFetcher for UreqNetwork {
    async fn download(&self, url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
        let url = url.to_string();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || download_blocking(&url, &dest, timeout))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}

fn download_blocking(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = match agent.get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::Status(code, _)) => anyhow::bail!("HTTP {code} from {url}"),
        Err(e) => anyhow::bail!("requesting {url}: {e}"),
    };

    let mut file =
        File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
    let mut reader = response.into_reader();
    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;
    loop {
        let n = reader.read(&mut buf).context("download interrupted")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).context("download interrupted")?;
        written += n as u64;
    }
    file.flush().context("flushing download")?;
    tracing::debug!(url, bytes = written, "download complete");
    Ok(written)
}

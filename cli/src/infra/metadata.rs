//! Session-token instance-metadata client (IMDSv2 wire format).

use anyhow::{Context, Result};

use crate::application::ports::InstanceMetadata;
use crate::domain::MetadataConfig;
use crate::infra::http::UreqNetwork;

const TOKEN_PATH: &str = "/latest/api/token";
const INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

impl InstanceMetadata for UreqNetwork {
    async fn instance_id(&self) -> Result<Option<String>> {
        let metadata = self.metadata.clone();
        tokio::task::spawn_blocking(move || query_instance_id(&metadata))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}

fn query_instance_id(metadata: &MetadataConfig) -> Result<Option<String>> {
    let agent = ureq::AgentBuilder::new()
        .timeout(metadata.timeout())
        .build();
    let base = metadata.endpoint.trim_end_matches('/');

    let token = match agent
        .put(&format!("{base}{TOKEN_PATH}"))
        .set(TOKEN_TTL_HEADER, &metadata.token_ttl_secs.to_string())
        .call()
    {
        Ok(response) => response.into_string().context("reading metadata token")?,
        Err(e) => {
            tracing::debug!(error = %e, "no instance-metadata service");
            return Ok(None);
        }
    };

    let id = match agent
        .get(&format!("{base}{INSTANCE_ID_PATH}"))
        .set(TOKEN_HEADER, token.trim())
        .call()
    {
        Ok(response) => response.into_string().context("reading instance id")?,
        Err(ureq::Error::Status(code, _)) => {
            anyhow::bail!("instance-id query returned HTTP {code}")
        }
        Err(e) => anyhow::bail!("querying instance id: {e}"),
    };

    let id = id.trim();
    anyhow::ensure!(!id.is_empty(), "instance-metadata service returned an empty id");
    Ok(Some(id.to_string()))
}

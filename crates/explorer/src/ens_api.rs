//! ENS resolution through the Blockscout name service (BENS).

use crate::client::{endpoint, fetch_json};
use crate::error::Result;
use crate::models::DomainInfo;
use reqwest::Client;
use std::time::Duration;

/// Client for the Blockscout ENS indexer (BENS).
#[derive(Debug, Clone)]
pub struct EnsClient {
    base_url: String,
    http_client: Client,
}

impl EnsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(base_url, crate::http_client(timeout)?))
    }

    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    /// Looks up `name` on the chain with id `chain_id`. Names are normalized
    /// to lowercase as ENS requires.
    pub async fn domain(&self, chain_id: u64, name: &str) -> Result<DomainInfo> {
        let name = name.to_lowercase();
        let chain = chain_id.to_string();
        let url = endpoint(&self.base_url, &[chain.as_str(), "domains", name.as_str()])?;
        fetch_json(&self.http_client, url).await
    }
}

//! Blockscout v2 REST client

use crate::error::{ExplorerError, Result};
use crate::models::{AddressInfo, BlockInfo, NetworkStats, SearchResults, TransactionInfo};
use crate::networks::ExplorerNetwork;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Read-only client for the Blockscout explorer API.
///
/// The client is network-agnostic: every call takes the [`ExplorerNetwork`]
/// to query, so one client serves the whole network table.
#[derive(Debug, Clone)]
pub struct BlockscoutClient {
    http_client: Client,
}

impl BlockscoutClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(crate::http_client(timeout)?))
    }

    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    pub async fn address(&self, network: &ExplorerNetwork, address: &str) -> Result<AddressInfo> {
        let url = endpoint(&network.api_url, &["addresses", address])?;
        fetch_json(&self.http_client, url).await
    }

    pub async fn transaction(
        &self,
        network: &ExplorerNetwork,
        hash: &str,
    ) -> Result<TransactionInfo> {
        let url = endpoint(&network.api_url, &["transactions", hash])?;
        fetch_json(&self.http_client, url).await
    }

    /// `number` may be a height or a block hash.
    pub async fn block(&self, network: &ExplorerNetwork, number: &str) -> Result<BlockInfo> {
        let url = endpoint(&network.api_url, &["blocks", number])?;
        fetch_json(&self.http_client, url).await
    }

    pub async fn stats(&self, network: &ExplorerNetwork) -> Result<NetworkStats> {
        let url = endpoint(&network.api_url, &["stats"])?;
        fetch_json(&self.http_client, url).await
    }

    pub async fn search(&self, network: &ExplorerNetwork, query: &str) -> Result<SearchResults> {
        let mut url = endpoint(&network.api_url, &["search"])?;
        url.query_pairs_mut().append_pair("q", query);
        fetch_json(&self.http_client, url).await
    }

    /// Round-trip time of a `/stats` request, used to probe reachability.
    pub async fn probe(&self, network: &ExplorerNetwork) -> Result<Duration> {
        let started = Instant::now();
        self.stats(network).await?;
        Ok(started.elapsed())
    }
}

/// Appends escaped path segments to `base`.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| ExplorerError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GETs `url` and decodes the JSON body.
///
/// Non-success statuses become [`ExplorerError::Status`], carrying the
/// server's `message` field when the error body has one.
pub(crate) async fn fetch_json<T: DeserializeOwned>(http_client: &Client, url: Url) -> Result<T> {
    debug!(url = %url, "GET");
    let response = http_client.get(url).send().await?;
    let status = response.status();
    let content = response.text().await?;
    trace!(status = %status, bytes = content.len(), "response received");

    if !status.is_success() {
        return Err(ExplorerError::Status {
            status,
            message: error_message(&content),
        });
    }

    Ok(serde_json::from_str(&content)?)
}

fn error_message(content: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

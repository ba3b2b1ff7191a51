//! Blockscout deployments the terminal knows about.

use crate::error::{ExplorerError, Result};
use indexmap::IndexMap;
use w3t_config::{ExplorerConfig, ExplorerNetworkConfig};

/// One Blockscout deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerNetwork {
    pub key: String,
    pub name: String,
    /// Explorer front-end, used for links
    pub url: String,
    /// REST API root
    pub api_url: String,
    pub symbol: String,
    pub chain_id: u64,
    pub is_l2: bool,
}

impl ExplorerNetwork {
    fn builtin(
        key: &str,
        name: &str,
        url: &str,
        symbol: &str,
        chain_id: u64,
        is_l2: bool,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            api_url: format!("{url}/api/v2"),
            symbol: symbol.to_string(),
            chain_id,
            is_l2,
        }
    }

    pub fn layer(&self) -> &'static str {
        if self.is_l2 {
            "Layer 2"
        } else {
            "Layer 1"
        }
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.url, address)
    }

    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.url, hash)
    }

    pub fn block_url(&self, number: &str) -> String {
        format!("{}/block/{}", self.url, number)
    }
}

impl From<&ExplorerNetworkConfig> for ExplorerNetwork {
    fn from(config: &ExplorerNetworkConfig) -> Self {
        let url = config.url.trim_end_matches('/').to_string();
        let api_url = config
            .api_url
            .as_deref()
            .map(|api| api.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{url}/api/v2"));
        Self {
            key: config.key.trim().to_ascii_lowercase(),
            name: config.name.clone(),
            url,
            api_url,
            symbol: config.symbol.clone(),
            chain_id: config.chain_id,
            is_l2: config.is_l2,
        }
    }
}

fn builtin_networks() -> Vec<ExplorerNetwork> {
    vec![
        // Mainnets
        ExplorerNetwork::builtin("eth", "Ethereum Mainnet", "https://eth.blockscout.com", "ETH", 1, false),
        ExplorerNetwork::builtin("arb", "Arbitrum One", "https://arbitrum.blockscout.com", "ETH", 42161, true),
        ExplorerNetwork::builtin("base", "Base", "https://base.blockscout.com", "ETH", 8453, true),
        ExplorerNetwork::builtin("polygon", "Polygon PoS", "https://polygon.blockscout.com", "MATIC", 137, true),
        ExplorerNetwork::builtin("gnosis", "Gnosis Chain", "https://gnosis.blockscout.com", "xDAI", 100, false),
        ExplorerNetwork::builtin("optimism", "Optimism", "https://optimism.blockscout.com", "ETH", 10, true),
        ExplorerNetwork::builtin("zksync", "zkSync Era", "https://zksync.blockscout.com", "ETH", 324, true),
        // Testnets
        ExplorerNetwork::builtin("sepolia", "Sepolia Testnet", "https://sepolia.blockscout.com", "ETH", 11155111, false),
        ExplorerNetwork::builtin("goerli", "Goerli Testnet", "https://goerli.blockscout.com", "ETH", 5, false),
        ExplorerNetwork::builtin("arb-goerli", "Arbitrum Goerli", "https://goerli.arbiscan.io", "ETH", 421613, true),
        ExplorerNetwork::builtin("base-goerli", "Base Goerli", "https://goerli.basescan.org", "ETH", 84531, true),
    ]
}

/// Ordered table of networks keyed by their lowercase key
#[derive(Debug, Clone)]
pub struct NetworkTable {
    networks: IndexMap<String, ExplorerNetwork>,
    default: ExplorerNetwork,
}

impl NetworkTable {
    /// Built-in networks with `eth` as the default.
    pub fn builtin() -> Self {
        let networks: IndexMap<String, ExplorerNetwork> = builtin_networks()
            .into_iter()
            .map(|network| (network.key.clone(), network))
            .collect();
        let default = networks[0].clone();
        Self { networks, default }
    }

    /// Built-in networks plus configured ones. A configured network with a
    /// built-in key replaces it in place.
    pub fn from_config(config: &ExplorerConfig) -> Result<Self> {
        let mut table = Self::builtin();
        for network in &config.networks {
            let network = ExplorerNetwork::from(network);
            table.networks.insert(network.key.clone(), network);
        }
        table.default = table
            .get(&config.default_network)
            .cloned()
            .ok_or_else(|| ExplorerError::UnknownNetwork(config.default_network.clone()))?;
        Ok(table)
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&ExplorerNetwork> {
        self.networks.get(&key.to_ascii_lowercase())
    }

    /// Resolves an optional network argument, falling back to the default.
    pub fn resolve(&self, key: Option<&str>) -> Result<&ExplorerNetwork> {
        match key {
            None => Ok(&self.default),
            Some(key) => self
                .get(key)
                .ok_or_else(|| ExplorerError::UnknownNetwork(key.to_string())),
        }
    }

    pub fn default_network(&self) -> &ExplorerNetwork {
        &self.default
    }

    pub fn by_chain_id(&self, chain_id: u64) -> Option<&ExplorerNetwork> {
        self.networks.values().find(|network| network.chain_id == chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExplorerNetwork> {
        self.networks.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

//! State carried from one command to the next.

use anyhow::Result;
use std::sync::Arc;
use w3t_config::WalletConfig;
use w3t_wallet::{JsonRpcProvider, WalletProvider, WalletSession};

/// Session context handed to every handler by the console.
#[derive(Debug, Default)]
pub struct TerminalSession {
    pub wallet: WalletSession,
}

impl TerminalSession {
    pub fn new(wallet: WalletSession) -> Self {
        Self { wallet }
    }

    /// Connects the configured provider, if any. No request is sent until a
    /// wallet command runs.
    pub fn from_config(config: &WalletConfig) -> Result<Self> {
        let provider = match &config.provider_url {
            Some(url) => {
                let provider: Arc<dyn WalletProvider> =
                    Arc::new(JsonRpcProvider::new(url.clone(), config.timeout())?);
                Some(provider)
            }
            None => None,
        };
        Ok(Self::new(WalletSession::new(provider)))
    }
}

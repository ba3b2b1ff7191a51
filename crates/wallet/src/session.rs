//! Per-session wallet context: the provider and the connected account.

use crate::error::{Result, WalletError};
use crate::provider::WalletProvider;
use crate::quantity::{is_address, parse_quantity, to_quantity};
use num_bigint::BigUint;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Wallet state owned by one terminal session.
///
/// The connected account lives here rather than in any shared state, so
/// two sessions never observe each other's `summon`.
#[derive(Clone, Default)]
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    account: Option<String>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            provider,
            account: None,
        }
    }

    /// A session without any wallet provider.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_description(&self) -> Option<String> {
        self.provider.as_ref().map(|provider| provider.describe())
    }

    /// Account stored by the last successful [`request_accounts`](Self::request_accounts).
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn provider(&self) -> Result<&dyn WalletProvider> {
        self.provider.as_deref().ok_or(WalletError::NoProvider)
    }

    fn require_account(&self) -> Result<&str> {
        self.account.as_deref().ok_or(WalletError::NotConnected)
    }

    /// `eth_requestAccounts`: asks the wallet for access and remembers the
    /// first account it grants.
    pub async fn request_accounts(&mut self) -> Result<String> {
        let accounts = self
            .provider()?
            .request("eth_requestAccounts", json!([]))
            .await?;
        let account = first_account(accounts)?.ok_or_else(|| {
            WalletError::InvalidResponse("wallet granted no accounts".to_string())
        })?;
        info!(account = %account, "wallet connected");
        self.account = Some(account.clone());
        Ok(account)
    }

    /// `eth_accounts`: accounts already authorised, without prompting.
    pub async fn accounts(&self) -> Result<Vec<String>> {
        let accounts = self.provider()?.request("eth_accounts", json!([])).await?;
        Ok(serde_json::from_value(accounts)?)
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let value = self.provider()?.request("eth_chainId", json!([])).await?;
        let chain_id = parse_quantity(as_str(&value)?)?;
        u64::try_from(chain_id)
            .map_err(|_| WalletError::InvalidResponse("chain id out of range".to_string()))
    }

    /// Balance of the connected account in wei.
    pub async fn balance(&self) -> Result<BigUint> {
        let account = self.require_account()?;
        let value = self
            .provider()?
            .request("eth_getBalance", json!([account, "latest"]))
            .await?;
        parse_quantity(as_str(&value)?)
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> Result<BigUint> {
        let value = self.provider()?.request("eth_gasPrice", json!([])).await?;
        parse_quantity(as_str(&value)?)
    }

    /// Sends `value` wei from the connected account to `to`; returns the
    /// transaction hash.
    pub async fn send_transaction(&self, to: &str, value: &BigUint) -> Result<String> {
        if !is_address(to) {
            return Err(WalletError::InvalidAddress(to.to_string()));
        }
        let from = self.require_account()?;
        let params = json!([{
            "from": from,
            "to": to,
            "value": to_quantity(value),
        }]);
        let hash = self
            .provider()?
            .request("eth_sendTransaction", params)
            .await?;
        let hash = as_str(&hash)?.to_string();
        info!(%to, %hash, "transaction submitted");
        Ok(hash)
    }

    /// Forgets the connected account, returning it.
    pub fn disconnect(&mut self) -> Option<String> {
        self.account.take()
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("provider", &self.provider_description())
            .field("account", &self.account)
            .finish()
    }
}

fn as_str(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| WalletError::InvalidResponse(format!("expected a string, got {value}")))
}

fn first_account(accounts: Value) -> Result<Option<String>> {
    let accounts: Vec<String> = serde_json::from_value(accounts)?;
    Ok(accounts.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers from a fixed table and records the calls it saw.
    struct ScriptedProvider {
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl WalletProvider for ScriptedProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params));
            match method {
                "eth_requestAccounts" | "eth_accounts" => {
                    Ok(json!(["0x1111111111111111111111111111111111111111"]))
                }
                "eth_getBalance" => Ok(json!("0xde0b6b3a7640000")),
                "eth_sendTransaction" => Ok(json!("0xabc")),
                _ => Err(WalletError::rpc(-32601, "Method not found")),
            }
        }
    }

    fn scripted() -> (Arc<ScriptedProvider>, WalletSession) {
        let provider = Arc::new(ScriptedProvider {
            calls: Mutex::new(Vec::new()),
        });
        let shared: Arc<dyn WalletProvider> = provider.clone();
        let session = WalletSession::new(Some(shared));
        (provider, session)
    }

    #[tokio::test]
    async fn balance_requires_summon() {
        let (_, mut session) = scripted();
        assert!(matches!(
            session.balance().await,
            Err(WalletError::NotConnected)
        ));

        session.request_accounts().await.unwrap();
        assert_eq!(
            session.balance().await.unwrap(),
            BigUint::from(1_000_000_000_000_000_000u64)
        );
    }

    #[tokio::test]
    async fn detached_session_reports_missing_provider() {
        let mut session = WalletSession::detached();
        let err = session.request_accounts().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No Web3 wallet detected. Please configure a wallet provider URL."
        );
    }

    #[tokio::test]
    async fn send_encodes_value_as_quantity() {
        let (provider, mut session) = scripted();
        session.request_accounts().await.unwrap();
        let hash = session
            .send_transaction(
                "0x2222222222222222222222222222222222222222",
                &BigUint::from(16u32),
            )
            .await
            .unwrap();
        assert_eq!(hash, "0xabc");

        let calls = provider.calls.lock().unwrap();
        let (method, params) = calls.last().unwrap();
        assert_eq!(method, "eth_sendTransaction");
        assert_eq!(params[0]["value"], json!("0x10"));
        assert_eq!(
            params[0]["from"],
            json!("0x1111111111111111111111111111111111111111")
        );
    }

    #[tokio::test]
    async fn send_rejects_malformed_recipient() {
        let (_, mut session) = scripted();
        session.request_accounts().await.unwrap();
        let err = session
            .send_transaction("vitalik", &BigUint::from(1u32))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidAddress(_)));
    }

    #[test]
    fn disconnect_forgets_account() {
        let mut session = WalletSession::detached();
        assert_eq!(session.disconnect(), None);
    }
}

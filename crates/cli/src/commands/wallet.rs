//! Commands backed by the session's wallet provider.

use super::network::chain_name;
use super::Services;
use crate::session::TerminalSession;
use async_trait::async_trait;
use std::sync::Arc;
use w3t_console::{CommandHandler, CommandResult, OperationExt};
use w3t_explorer::{format_units, parse_units, ETHER_DECIMALS, GWEI_DECIMALS};
use w3t_wallet::{is_address, short_address, WalletError};

const WEB3_HELP: &str = "\u{1f310} Web3 Terminal Commands:
-------------------------
  summon     - Connect Web3 wallet
  disconnect - Forget the connected wallet
  status     - Check wallet connection status
  balance    - Check wallet balance
  gas        - Check gas prices
  send       - Send ETH (usage: send <address> <amount>)
  network    - Show current network (network status)
  block      - Look up a block
  about      - About Web3 Terminal
  web3help   - Show this help message

\u{1f4a1} Tips:
  - Use 'summon' first to connect your wallet
  - Check 'network status' to ensure you're on the right chain
  - Always verify addresses when using 'send'";

/// Wallet conditions the user can fix are shown as plain output; anything
/// else is a failure of `operation`.
fn wallet_outcome<T>(
    result: Result<T, WalletError>,
    operation: &str,
) -> Result<Result<T, String>, w3t_console::CommandError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(
            err @ (WalletError::NoProvider | WalletError::NotConnected | WalletError::UserRejected),
        ) => Ok(Err(err.to_string())),
        Err(err) => Err(err).operation(operation),
    }
}

pub struct Summon;

#[async_trait]
impl CommandHandler<TerminalSession> for Summon {
    async fn call(&self, session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        let result = session.wallet.request_accounts().await;
        Ok(match wallet_outcome(result, "connecting wallet")? {
            Ok(account) => format!("Connected to wallet: {account}"),
            Err(message) => message,
        })
    }
}

pub struct Disconnect;

#[async_trait]
impl CommandHandler<TerminalSession> for Disconnect {
    async fn call(&self, session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        Ok(match session.wallet.disconnect() {
            Some(account) => format!("Disconnected from wallet: {account}"),
            None => "No wallet connected.".to_string(),
        })
    }
}

/// Never fails: a provider error is itself a status.
pub struct Status;

#[async_trait]
impl CommandHandler<TerminalSession> for Status {
    async fn call(&self, session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        if !session.wallet.has_provider() {
            return Ok("\u{1f534} No Web3 Wallet".to_string());
        }
        Ok(match session.wallet.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => format!("\u{1f7e2} Connected: {}", short_address(account)),
                None => "\u{1f7e1} Wallet Found (Not Connected)".to_string(),
            },
            Err(err) => {
                tracing::debug!(error = %err, "wallet status check failed");
                "\u{1f534} Connection Error".to_string()
            }
        })
    }
}

pub struct Balance {
    services: Arc<Services>,
}

impl Balance {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Balance {
    async fn call(&self, session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        let wei = match wallet_outcome(session.wallet.balance().await, "fetching balance")? {
            Ok(wei) => wei,
            Err(message) => return Ok(message),
        };
        // The explorer table knows the native symbol of most chains.
        let symbol = match session.wallet.chain_id().await {
            Ok(chain_id) => self
                .services
                .networks
                .by_chain_id(chain_id)
                .map(|network| network.symbol.clone()),
            Err(_) => None,
        }
        .unwrap_or_else(|| "ETH".to_string());
        Ok(format!(
            "Balance: {} {symbol}",
            format_units(&wei, ETHER_DECIMALS)
        ))
    }
}

pub struct Gas;

#[async_trait]
impl CommandHandler<TerminalSession> for Gas {
    async fn call(&self, session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        let wei = match wallet_outcome(session.wallet.gas_price().await, "fetching gas price")? {
            Ok(wei) => wei,
            Err(message) => return Ok(message),
        };
        Ok(format!(
            "Gas Price: {} Gwei",
            format_units(&wei, GWEI_DECIMALS)
        ))
    }
}

/// `send <address> <amount>`, amount in ether.
pub struct SendEth;

#[async_trait]
impl CommandHandler<TerminalSession> for SendEth {
    async fn call(&self, session: &mut TerminalSession, args: &[String]) -> CommandResult {
        let [to, amount] = args else {
            return Ok("Usage: send <address> <amount>".to_string());
        };
        if !is_address(to) {
            return Ok(format!("Invalid address: {to}"));
        }
        let Some(value) = parse_units(amount, ETHER_DECIMALS) else {
            return Ok(format!("Invalid amount: {amount}"));
        };
        if session.wallet.account().is_none() {
            return Ok(WalletError::NotConnected.to_string());
        }

        let sent = session.wallet.send_transaction(to, &value).await;
        let hash = match wallet_outcome(sent, "sending transaction")? {
            Ok(hash) => hash,
            Err(message) => return Ok(message),
        };
        let chain = match session.wallet.chain_id().await {
            Ok(chain_id) => format!(" on {}", chain_name(chain_id)),
            Err(_) => String::new(),
        };
        Ok(format!(
            "Transaction sent{chain}: {hash}\nAmount: {} ETH to {to}",
            format_units(&value, ETHER_DECIMALS)
        ))
    }
}

pub struct Web3Help;

#[async_trait]
impl CommandHandler<TerminalSession> for Web3Help {
    async fn call(&self, _session: &mut TerminalSession, _args: &[String]) -> CommandResult {
        Ok(WEB3_HELP.to_string())
    }
}

use super::Services;
use crate::session::TerminalSession;
use anyhow::anyhow;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use w3t_console::{CommandHandler, CommandResult, OperationExt};

const USAGE: &str = "Usage: network <command> [options]

Commands:
  status        Check network connection
  ping <host>   Ping a host
  scan          Scan available networks

Examples:
  network status
  network ping ethereum.org";

const PING_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_PING_PORT: u16 = 443;

/// Display name for the chains wallets commonly report.
pub(crate) fn chain_name(chain_id: u64) -> String {
    let name = match chain_id {
        1 => "Ethereum Mainnet",
        5 => "Goerli Testnet",
        10 => "Optimism",
        56 => "BSC Mainnet",
        97 => "BSC Testnet",
        100 => "Gnosis Chain",
        137 => "Polygon Mainnet",
        324 => "zkSync Era",
        8453 => "Base",
        42161 => "Arbitrum One",
        80001 => "Mumbai Testnet",
        11155111 => "Sepolia Testnet",
        other => return format!("Network ID {other}"),
    };
    name.to_string()
}

/// `network status | ping <host> | scan`
pub struct Network {
    services: Arc<Services>,
}

impl Network {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    async fn status(&self, session: &TerminalSession) -> CommandResult {
        let wallet = &session.wallet;
        let Some(provider) = wallet.provider_description() else {
            return Ok("No Web3 wallet configured".to_string());
        };
        let chain_id = wallet.chain_id().await.operation("fetching network")?;
        Ok(format!(
            "Connected to: {}\nProvider: {provider}\nAccount: {}",
            chain_name(chain_id),
            wallet.account().unwrap_or("not connected"),
        ))
    }

    async fn scan(&self) -> String {
        let explorer = &self.services.explorer;
        let networks: Vec<_> = self.services.networks.iter().collect();
        let probes = join_all(networks.iter().map(|network| explorer.probe(network))).await;

        let mut output = format!("Scanning {} explorer networks:\n", networks.len());
        let mut reachable = 0;
        for (network, probe) in networks.iter().zip(probes) {
            let line = match probe {
                Ok(elapsed) => {
                    reachable += 1;
                    format!("  {:<12} \u{2713} {} ms\n", network.key, elapsed.as_millis())
                }
                Err(err) => format!("  {:<12} \u{2717} {err}\n", network.key),
            };
            output.push_str(&line);
        }
        output.push_str(&format!("\n{reachable}/{} reachable", networks.len()));
        output
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Network {
    async fn call(&self, session: &mut TerminalSession, args: &[String]) -> CommandResult {
        match args.first().map(String::as_str) {
            Some("status") => self.status(session).await,
            Some("ping") => match args.get(1) {
                Some(host) => ping(host).await,
                None => Ok("Please provide a host. Usage: network ping <host>".to_string()),
            },
            Some("scan") => Ok(self.scan().await),
            _ => Ok(USAGE.to_string()),
        }
    }
}

/// Splits `host[:port]`, dropping any URL scheme or path.
fn ping_target(input: &str) -> (String, u16) {
    let without_scheme = input
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(input);
    let authority = without_scheme.split('/').next().unwrap_or(without_scheme);
    match authority.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (authority.to_string(), DEFAULT_PING_PORT),
        },
        None => (authority.to_string(), DEFAULT_PING_PORT),
    }
}

/// Measures a TCP handshake, which works without raw-socket privileges.
async fn ping(input: &str) -> CommandResult {
    let (host, port) = ping_target(input);
    let operation = format!("pinging {host}");
    let started = Instant::now();
    tokio::time::timeout(PING_TIMEOUT, TcpStream::connect((host.as_str(), port)))
        .await
        .map_err(|_| anyhow!("timed out after {}s", PING_TIMEOUT.as_secs()))
        .operation(operation.clone())?
        .operation(operation)?;
    Ok(format!(
        "Reply from {host}:{port}: time={} ms",
        started.elapsed().as_millis()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_chains() {
        assert_eq!(chain_name(1), "Ethereum Mainnet");
        assert_eq!(chain_name(8453), "Base");
        assert_eq!(chain_name(31337), "Network ID 31337");
    }

    #[test]
    fn ping_targets() {
        assert_eq!(ping_target("ethereum.org"), ("ethereum.org".to_string(), 443));
        assert_eq!(
            ping_target("https://eth.blockscout.com/api"),
            ("eth.blockscout.com".to_string(), 443)
        );
        assert_eq!(ping_target("127.0.0.1:8545"), ("127.0.0.1".to_string(), 8545));
    }

    #[tokio::test]
    async fn ping_reaches_a_local_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let output = ping(&format!("127.0.0.1:{port}")).await.unwrap();
        assert!(output.starts_with(&format!("Reply from 127.0.0.1:{port}: time=")));
    }
}

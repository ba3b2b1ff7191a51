//! `blockscout` and its single-word aliases (`address`, `tx`, `block`,
//! `stats`, `networks`).

use super::Services;
use crate::session::TerminalSession;
use async_trait::async_trait;
use std::sync::Arc;
use w3t_console::{CommandHandler, CommandResult, OperationExt};
use w3t_explorer::{
    format_decimal, AddressInfo, BlockInfo, ExplorerNetwork, NetworkStats, NetworkTable,
    TransactionInfo, ETHER_DECIMALS, GWEI_DECIMALS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Networks,
    Address,
    Transaction,
    Block,
    Stats,
    Help,
}

impl Subcommand {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "networks" => Some(Subcommand::Networks),
            "address" => Some(Subcommand::Address),
            "tx" => Some(Subcommand::Transaction),
            "block" => Some(Subcommand::Block),
            "stats" => Some(Subcommand::Stats),
            "help" => Some(Subcommand::Help),
            _ => None,
        }
    }
}

/// Explorer queries against the Blockscout network table.
///
/// Registered once as `blockscout <subcommand> ...` and once per alias,
/// where the alias name stands in for `blockscout <subcommand>` in usage
/// text.
pub struct Blockscout {
    services: Arc<Services>,
    alias: Option<(&'static str, Subcommand)>,
}

impl Blockscout {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            alias: None,
        }
    }

    pub fn alias(services: Arc<Services>, name: &'static str, subcommand: Subcommand) -> Self {
        Self {
            services,
            alias: Some((name, subcommand)),
        }
    }

    async fn run(&self, subcommand: Subcommand, usage: &str, args: &[String]) -> CommandResult {
        let networks = &self.services.networks;
        let explorer = &self.services.explorer;

        match subcommand {
            Subcommand::Help => Ok(help_text(networks)),
            Subcommand::Networks => Ok(format_networks(networks)),
            Subcommand::Address => {
                let Some(address) = args.first() else {
                    return Ok(format!(
                        "Please provide an address. Usage: {usage} <addr> [network]"
                    ));
                };
                let network = match select_network(networks, args.get(1)) {
                    Ok(network) => network,
                    Err(message) => return Ok(message),
                };
                let info = explorer
                    .address(network, address)
                    .await
                    .operation("fetching address")?;
                Ok(format_address(network, address, &info))
            }
            Subcommand::Transaction => {
                let Some(hash) = args.first() else {
                    return Ok(format!(
                        "Please provide a transaction hash. Usage: {usage} <hash> [network]"
                    ));
                };
                let network = match select_network(networks, args.get(1)) {
                    Ok(network) => network,
                    Err(message) => return Ok(message),
                };
                let tx = explorer
                    .transaction(network, hash)
                    .await
                    .operation("fetching transaction")?;
                Ok(format_transaction(network, hash, &tx))
            }
            Subcommand::Block => {
                let Some(number) = args.first() else {
                    return Ok(format!(
                        "Please provide a block number. Usage: {usage} <number> [network]"
                    ));
                };
                let network = match select_network(networks, args.get(1)) {
                    Ok(network) => network,
                    Err(message) => return Ok(message),
                };
                let block = explorer
                    .block(network, number)
                    .await
                    .operation("fetching block")?;
                Ok(format_block(network, number, &block))
            }
            Subcommand::Stats => {
                let network = match select_network(networks, args.first()) {
                    Ok(network) => network,
                    Err(message) => return Ok(message),
                };
                let stats = explorer
                    .stats(network)
                    .await
                    .operation("fetching network stats")?;
                Ok(format_stats(network, &stats))
            }
        }
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Blockscout {
    async fn call(&self, _session: &mut TerminalSession, args: &[String]) -> CommandResult {
        if let Some((name, subcommand)) = self.alias {
            return self.run(subcommand, name, args).await;
        }

        let Some((word, rest)) = args.split_first() else {
            return Ok(help_text(&self.services.networks));
        };
        match Subcommand::parse(word) {
            Some(subcommand) => {
                self.run(subcommand, &format!("blockscout {word}"), rest)
                    .await
            }
            None => Ok(format!(
                "Unknown command: {word}. Type 'blockscout help' for available commands."
            )),
        }
    }
}

/// The named network or the default. An unknown key is reported as normal
/// output, not as a failure.
pub(crate) fn select_network<'a>(
    networks: &'a NetworkTable,
    key: Option<&String>,
) -> Result<&'a ExplorerNetwork, String> {
    networks
        .resolve(key.map(String::as_str))
        .map_err(|err| err.to_string())
}

fn yes_no(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) {
        "Yes"
    } else {
        "No"
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Renders a decimal wei string in ether, leaving unparsable values as-is.
fn ether(value: Option<&str>) -> String {
    match value {
        Some(raw) => format_decimal(raw, ETHER_DECIMALS).unwrap_or_else(|| raw.to_string()),
        None => "0".to_string(),
    }
}

pub(crate) fn format_address(network: &ExplorerNetwork, address: &str, info: &AddressInfo) -> String {
    format!(
        "Address Information ({name}):\n\
         Hash: {hash}\n\
         Balance: {balance} {symbol}\n\
         Type: {kind}\n\
         Has Tokens: {tokens}\n\
         Has Token Transfers: {transfers}\n\
         Verified: {verified}\n\
         Flagged as Scam: {scam}\n\
         \n\
         Explorer URL: {url}",
        name = network.name,
        hash = info.hash,
        balance = ether(info.coin_balance.as_deref()),
        symbol = network.symbol,
        kind = if info.is_contract.unwrap_or(false) { "Contract" } else { "EOA" },
        tokens = yes_no(info.has_tokens),
        transfers = yes_no(info.has_token_transfers),
        verified = yes_no(info.is_verified),
        scam = yes_no(info.is_scam),
        url = network.address_url(address),
    )
}

pub(crate) fn format_transaction(
    network: &ExplorerNetwork,
    hash: &str,
    tx: &TransactionInfo,
) -> String {
    let block = tx
        .height()
        .map(|height| height.to_string())
        .unwrap_or_else(|| "pending".to_string());
    let to = tx
        .to
        .as_ref()
        .map(|to| to.hash.as_str())
        .unwrap_or("contract creation");
    let gas_price = tx
        .gas_price
        .as_deref()
        .and_then(|price| format_decimal(price, GWEI_DECIMALS))
        .map(|gwei| format!("{gwei} Gwei"))
        .unwrap_or_else(|| "-".to_string());
    let tx_type = tx
        .tx_type
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Transaction Information ({name}):\n\
         Hash: {hash}\n\
         Block: {block}\n\
         From: {from}\n\
         To: {to}\n\
         Value: {value} {symbol}\n\
         Gas Used: {gas_used}\n\
         Gas Price: {gas_price}\n\
         Status: {status}\n\
         Time: {time}\n\
         Type: {tx_type}\n\
         \n\
         Explorer URL: {url}",
        name = network.name,
        hash = tx.hash,
        from = tx.from.hash,
        value = ether(tx.value.as_deref()),
        symbol = network.symbol,
        gas_used = or_dash(tx.gas_used.as_deref()),
        status = tx.status.as_deref().unwrap_or("pending"),
        time = or_dash(tx.timestamp.as_deref()),
        url = network.tx_url(hash),
    )
}

pub(crate) fn format_block(network: &ExplorerNetwork, number: &str, block: &BlockInfo) -> String {
    let burnt = block
        .burnt_fees
        .as_deref()
        .and_then(|fees| fees.parse::<f64>().ok())
        .unwrap_or_default()
        / 1e18;
    let size = block
        .size
        .map(|size| format!("{size} bytes"))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Block Information ({name}):\n\
         Height: {height}\n\
         Hash: {hash}\n\
         Timestamp: {timestamp}\n\
         Miner: {miner}\n\
         Transactions: {txs}\n\
         Gas Used: {gas_used} ({percent:.2}% of {gas_limit})\n\
         Base Fee: {base_fee} wei\n\
         Burnt Fees: {burnt:.4} {symbol}\n\
         Size: {size}\n\
         Withdrawals: {withdrawals}\n\
         \n\
         Explorer URL: {url}",
        name = network.name,
        height = block.height,
        hash = block.hash,
        timestamp = or_dash(block.timestamp.as_deref()),
        miner = or_dash(block.miner.as_ref().map(|miner| miner.hash.as_str())),
        txs = block.tx_count(),
        gas_used = or_dash(block.gas_used.as_deref()),
        percent = block.gas_used_percentage.unwrap_or_default(),
        gas_limit = or_dash(block.gas_limit.as_deref()),
        base_fee = or_dash(block.base_fee_per_gas.as_deref()),
        symbol = network.symbol,
        withdrawals = block.withdrawals_count.unwrap_or_default(),
        url = network.block_url(number),
    )
}

fn format_stats(network: &ExplorerNetwork, stats: &NetworkStats) -> String {
    let mut output = format!(
        "Network Statistics ({}):\n\
         Chain ID: {}\n\
         Symbol: {}\n\
         Type: {}\n\
         API Version: v2\n",
        network.name,
        network.chain_id,
        network.symbol,
        network.layer(),
    );
    for (label, value) in [
        ("Total Blocks", &stats.total_blocks),
        ("Total Transactions", &stats.total_transactions),
        ("Transactions Today", &stats.transactions_today),
        ("Total Addresses", &stats.total_addresses),
    ] {
        if let Some(value) = value {
            output.push_str(&format!("{label}: {value}\n"));
        }
    }
    if let Some(millis) = stats.average_block_time {
        output.push_str(&format!("Average Block Time: {:.1}s\n", millis / 1000.0));
    }
    output.push_str(&format!("\nExplorer URL: {}", network.url));
    output
}

fn format_networks(networks: &NetworkTable) -> String {
    networks
        .iter()
        .map(|network| {
            format!(
                "{key:<12} - {name} ({symbol})\n  Chain ID: {chain_id}\n  Type: {layer}\n  URL: {url}",
                key = network.key,
                name = network.name,
                symbol = network.symbol,
                chain_id = network.chain_id,
                layer = network.layer(),
                url = network.url,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn help_text(networks: &NetworkTable) -> String {
    let keys = networks.keys().collect::<Vec<_>>().join(", ");
    format!(
        "Blockscout Explorer Commands:\n\
         \n\
         \x20 networks                    - List all available networks\n\
         \x20 address <addr> [network]    - Get address details\n\
         \x20 tx <hash> [network]         - Get transaction details\n\
         \x20 block <number> [network]    - Get block details\n\
         \x20 stats [network]             - Get network statistics\n\
         \n\
         Networks: {keys}\n\
         \n\
         Examples:\n\
         \x20 blockscout address 0x123... eth\n\
         \x20 blockscout tx 0x456... arb\n\
         \x20 blockscout block 12345 base\n\
         \x20 blockscout stats polygon"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use w3t_explorer::AddressRef;

    fn eth() -> ExplorerNetwork {
        NetworkTable::builtin().default_network().clone()
    }

    #[test]
    fn subcommand_words() {
        assert_eq!(Subcommand::parse("tx"), Some(Subcommand::Transaction));
        assert_eq!(Subcommand::parse("TX"), None);
        assert_eq!(Subcommand::parse("balance"), None);
    }

    #[test]
    fn unknown_network_is_plain_output() {
        let table = NetworkTable::builtin();
        let key = "solana".to_string();
        assert_eq!(
            select_network(&table, Some(&key)).unwrap_err(),
            "Network 'solana' not found."
        );
        let key = "ARB".to_string();
        assert_eq!(select_network(&table, Some(&key)).unwrap().chain_id, 42161);
    }

    #[test]
    fn address_layout() {
        let info = AddressInfo {
            hash: "0xabc".to_string(),
            coin_balance: Some("1500000000000000000".to_string()),
            is_contract: Some(true),
            has_token_transfers: Some(false),
            has_tokens: Some(true),
            exchange_rate: None,
            is_verified: None,
            is_scam: Some(false),
            name: None,
            ens_domain_name: None,
        };
        let output = format_address(&eth(), "0xabc", &info);
        assert_eq!(
            output,
            "Address Information (Ethereum Mainnet):\n\
             Hash: 0xabc\n\
             Balance: 1.5 ETH\n\
             Type: Contract\n\
             Has Tokens: Yes\n\
             Has Token Transfers: No\n\
             Verified: No\n\
             Flagged as Scam: No\n\
             \n\
             Explorer URL: https://eth.blockscout.com/address/0xabc"
        );
    }

    #[test]
    fn block_percentages_and_fees() {
        let block = BlockInfo {
            height: 100,
            hash: "0xb".to_string(),
            timestamp: None,
            transaction_count: Some(3),
            transactions_count: None,
            gas_used: Some("15000000".to_string()),
            gas_limit: Some("30000000".to_string()),
            gas_used_percentage: Some(50.0),
            base_fee_per_gas: Some("7".to_string()),
            miner: Some(AddressRef {
                hash: "0xminer".to_string(),
                name: None,
            }),
            size: Some(1024),
            withdrawals_count: None,
            burnt_fees: Some("300000000000000000".to_string()),
        };
        let output = format_block(&eth(), "100", &block);
        assert!(output.contains("Gas Used: 15000000 (50.00% of 30000000)"));
        assert!(output.contains("Burnt Fees: 0.3000 ETH"));
        assert!(output.contains("Base Fee: 7 wei"));
        assert!(output.contains("Withdrawals: 0"));
        assert!(output.ends_with("Explorer URL: https://eth.blockscout.com/block/100"));
    }

    #[test]
    fn networks_listing_starts_with_default() {
        let listing = format_networks(&NetworkTable::builtin());
        assert!(listing.starts_with("eth          - Ethereum Mainnet (ETH)\n  Chain ID: 1"));
        assert_eq!(listing.matches("Chain ID:").count(), 11);
    }
}

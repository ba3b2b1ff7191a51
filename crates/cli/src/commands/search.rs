use super::blockscout::{format_address, format_block, format_transaction, select_network};
use super::Services;
use crate::session::TerminalSession;
use async_trait::async_trait;
use std::sync::Arc;
use w3t_console::{CommandHandler, CommandResult, OperationExt};

const USAGE: &str = "Usage: search <type> <query> [network]

Types:
  tx        Search for transaction
  address   Search for address
  block     Search for block
  token     Search for token

Examples:
  search tx 0x1234...
  search address 0x5678...
  search token usdc base";

/// `search <tx|address|block|token> <query> [network]`
pub struct Search {
    services: Arc<Services>,
}

impl Search {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Search {
    async fn call(&self, _session: &mut TerminalSession, args: &[String]) -> CommandResult {
        let Some(kind) = args.first() else {
            return Ok(USAGE.to_string());
        };
        if !matches!(kind.as_str(), "tx" | "address" | "block" | "token") {
            return Ok(format!(
                "Unknown search type: {kind}. Types: tx, address, block, token"
            ));
        }
        let Some(query) = args.get(1) else {
            return Ok(
                "Please provide a search query. Usage: search <type> <query> [network]"
                    .to_string(),
            );
        };
        let network = match select_network(&self.services.networks, args.get(2)) {
            Ok(network) => network,
            Err(message) => return Ok(message),
        };
        let explorer = &self.services.explorer;

        match kind.as_str() {
            "tx" => {
                let tx = explorer
                    .transaction(network, query)
                    .await
                    .operation("searching transaction")?;
                Ok(format_transaction(network, query, &tx))
            }
            "address" => {
                let info = explorer
                    .address(network, query)
                    .await
                    .operation("searching address")?;
                Ok(format_address(network, query, &info))
            }
            "block" => {
                let block = explorer
                    .block(network, query)
                    .await
                    .operation("searching block")?;
                Ok(format_block(network, query, &block))
            }
            _ => {
                let results = explorer
                    .search(network, query)
                    .await
                    .operation("searching tokens")?;
                let lines: Vec<String> = results
                    .items
                    .iter()
                    .filter(|item| item.kind == "token")
                    .map(|item| {
                        format!(
                            "  {} ({}) - {}",
                            item.name.as_deref().unwrap_or("Unnamed token"),
                            item.symbol.as_deref().unwrap_or("?"),
                            item.target().unwrap_or("-"),
                        )
                    })
                    .collect();

                if lines.is_empty() {
                    return Ok(format!("No tokens found for '{query}' on {}.", network.name));
                }
                Ok(format!(
                    "Token search results for '{query}' ({}):\n{}",
                    network.name,
                    lines.join("\n")
                ))
            }
        }
    }
}

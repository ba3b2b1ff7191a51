//! The terminal's command set.
//!
//! Every command is a [`CommandHandler`] over [`TerminalSession`]. Network
//! clients live in [`Services`], shared by all handlers; per-session state
//! such as the connected wallet account lives in the session.

mod about;
mod blockscout;
mod crypto;
mod ens;
mod network;
mod search;
mod wallet;

pub use about::{about_text, CLEAR_SEQUENCE};
pub use blockscout::{Blockscout, Subcommand};

use crate::session::TerminalSession;
use anyhow::Result;
use std::sync::Arc;
use w3t_config::{Profile, TerminalConfig};
use w3t_console::{CommandHandler, CommandRegistry, ConsoleError, RegistryBuilder};
use w3t_explorer::{BlockscoutClient, EnsClient, MarketClient, NetworkTable};

/// Clients shared by the handlers.
#[derive(Debug)]
pub struct Services {
    pub networks: NetworkTable,
    pub explorer: BlockscoutClient,
    pub ens: EnsClient,
    pub market: MarketClient,
}

impl Services {
    pub fn from_config(config: &TerminalConfig) -> Result<Self> {
        Ok(Self {
            networks: NetworkTable::from_config(&config.explorer)?,
            explorer: BlockscoutClient::new(config.explorer.timeout())?,
            ens: EnsClient::new(config.explorer.ens_api_url.clone(), config.explorer.timeout())?,
            market: MarketClient::new(
                config.market.api_url.clone(),
                config.market.vs_currency.clone(),
                config.market.timeout(),
            )?,
        })
    }
}

type Builder = RegistryBuilder<TerminalSession>;

/// Builds the registry for `profile`. Declaration order is the order `help`
/// lists commands in.
pub fn build_registry(
    profile: Profile,
    services: Arc<Services>,
) -> Result<CommandRegistry<TerminalSession>, ConsoleError> {
    let mut builder = Builder::new()
        .register_fn("about", "About this terminal", |_, _| Ok(about_text()))?
        .register_fn("clear", "Clear terminal", |_, _| Ok(CLEAR_SEQUENCE.to_string()))?
        .register(
            "blockscout",
            "Blockchain explorer interface",
            Blockscout::new(services.clone()),
        )?;

    for (name, description, subcommand) in [
        ("address", "Look up an address", Subcommand::Address),
        ("tx", "Look up a transaction", Subcommand::Transaction),
        ("block", "Look up a block", Subcommand::Block),
        ("stats", "Explorer network statistics", Subcommand::Stats),
        ("networks", "List explorer networks", Subcommand::Networks),
    ] {
        builder = builder.register(
            name,
            description,
            Blockscout::alias(services.clone(), name, subcommand),
        )?;
    }

    builder = builder
        .register("ens", "Resolve an ENS name", ens::Ens::new(services.clone()))?
        .register(
            "search",
            "Search blockchain data",
            search::Search::new(services.clone()),
        )?
        .register(
            "crypto",
            "Cryptocurrency price checker",
            crypto::Crypto::new(services.clone()),
        )?
        .register(
            "network",
            "Network utilities",
            network::Network::new(services.clone()),
        )?;

    if profile.includes_wallet() {
        builder = register_wallet(builder, &services)?;
    }

    Ok(builder.build())
}

fn register_wallet(builder: Builder, services: &Arc<Services>) -> Result<Builder, ConsoleError> {
    let commands: [(&str, &str, Arc<dyn CommandHandler<TerminalSession>>); 7] = [
        ("summon", "Connect Web3 wallet", Arc::new(wallet::Summon)),
        ("disconnect", "Forget the connected wallet", Arc::new(wallet::Disconnect)),
        ("status", "Check wallet connection status", Arc::new(wallet::Status)),
        ("balance", "Check wallet balance", Arc::new(wallet::Balance::new(services.clone()))),
        ("gas", "Check gas prices", Arc::new(wallet::Gas)),
        ("send", "Send ETH", Arc::new(wallet::SendEth)),
        ("web3help", "Show Web3 command help", Arc::new(wallet::Web3Help)),
    ];

    commands
        .into_iter()
        .try_fold(builder, |builder, (name, description, handler)| {
            builder.register_arc(name, description, handler)
        })
}

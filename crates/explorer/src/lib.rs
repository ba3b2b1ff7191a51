//! HTTP clients behind the terminal's explorer, ENS and price commands.
//!
//! - [`BlockscoutClient`] talks to the Blockscout v2 REST API of any network
//!   in a [`NetworkTable`].
//! - [`EnsClient`] resolves names through the Blockscout name service.
//! - [`MarketClient`] reads spot prices and converts between assets.
//! - [`units`] renders wei amounts in ether or gwei.

pub mod client;
pub mod ens_api;
pub mod error;
pub mod market_api;
pub mod models;
pub mod networks;
pub mod units;

pub use client::BlockscoutClient;
pub use ens_api::EnsClient;
pub use error::{ExplorerError, Result};
pub use market_api::{coin_id, is_fiat, MarketClient};
pub use models::*;
pub use networks::{ExplorerNetwork, NetworkTable};
pub use units::{format_decimal, format_units, parse_units, ETHER_DECIMALS, GWEI_DECIMALS};

use reqwest::Client;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("w3t/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client with a request timeout.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

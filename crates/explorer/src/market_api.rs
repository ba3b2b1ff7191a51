//! Spot prices and conversions from a CoinGecko-compatible API.

use crate::client::{endpoint, fetch_json};
use crate::error::{ExplorerError, Result};
use crate::models::PriceTable;
use reqwest::Client;
use std::time::Duration;

/// Ticker symbol to API coin id
const COINS: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("matic", "matic-network"),
    ("pol", "matic-network"),
    ("xdai", "xdai"),
    ("dai", "dai"),
    ("usdc", "usd-coin"),
    ("usdt", "tether"),
    ("sol", "solana"),
    ("bnb", "binancecoin"),
    ("arb", "arbitrum"),
    ("op", "optimism"),
    ("link", "chainlink"),
    ("uni", "uniswap"),
    ("avax", "avalanche-2"),
];

/// Fiat currencies accepted as conversion targets
const FIATS: &[&str] = &["usd", "eur", "gbp", "jpy", "cny", "krw", "inr", "cad", "aud", "chf"];

/// Maps a ticker (case-insensitive) to its coin id.
pub fn coin_id(symbol: &str) -> Option<&'static str> {
    let symbol = symbol.to_ascii_lowercase();
    COINS
        .iter()
        .find(|(ticker, _)| *ticker == symbol)
        .map(|(_, id)| *id)
}

pub fn is_fiat(symbol: &str) -> bool {
    let symbol = symbol.to_ascii_lowercase();
    FIATS.contains(&symbol.as_str())
}

#[derive(Debug, Clone)]
pub struct MarketClient {
    base_url: String,
    vs_currency: String,
    http_client: Client,
}

impl MarketClient {
    pub fn new(
        base_url: impl Into<String>,
        vs_currency: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self::with_client(
            base_url,
            vs_currency,
            crate::http_client(timeout)?,
        ))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        vs_currency: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            vs_currency: vs_currency.into().to_ascii_lowercase(),
            http_client,
        }
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Price of one unit of `symbol` in `currency`.
    pub async fn price(&self, symbol: &str, currency: &str) -> Result<f64> {
        let id = coin_id(symbol)
            .ok_or_else(|| ExplorerError::NotFound(format!("Unknown symbol '{symbol}'")))?;
        let currency = currency.to_ascii_lowercase();
        let table = self.prices(&[id], &currency).await?;
        lookup(&table, id, &currency)
    }

    /// Price in the configured default currency.
    pub async fn spot(&self, symbol: &str) -> Result<f64> {
        let currency = self.vs_currency.clone();
        self.price(symbol, &currency).await
    }

    /// Converts `amount` of `from` into `to`. Either side may be a fiat
    /// currency, but not both.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let (from_lower, to_lower) = (from.to_ascii_lowercase(), to.to_ascii_lowercase());
        if from_lower == to_lower {
            return Ok(amount);
        }

        match (is_fiat(&from_lower), is_fiat(&to_lower)) {
            (true, true) => Err(ExplorerError::NotFound(
                "Fiat to fiat conversion is not supported".to_string(),
            )),
            (false, true) => Ok(amount * self.price(&from_lower, &to_lower).await?),
            (true, false) => {
                let price = self.price(&to_lower, &from_lower).await?;
                if price == 0.0 {
                    return Err(ExplorerError::NotFound(format!("No price for '{to}'")));
                }
                Ok(amount / price)
            }
            (false, false) => {
                let from_id = coin_id(&from_lower)
                    .ok_or_else(|| ExplorerError::NotFound(format!("Unknown symbol '{from}'")))?;
                let to_id = coin_id(&to_lower)
                    .ok_or_else(|| ExplorerError::NotFound(format!("Unknown symbol '{to}'")))?;
                let currency = self.vs_currency.clone();
                let table = self.prices(&[from_id, to_id], &currency).await?;
                let from_price = lookup(&table, from_id, &currency)?;
                let to_price = lookup(&table, to_id, &currency)?;
                if to_price == 0.0 {
                    return Err(ExplorerError::NotFound(format!("No price for '{to}'")));
                }
                Ok(amount * from_price / to_price)
            }
        }
    }

    async fn prices(&self, ids: &[&str], currency: &str) -> Result<PriceTable> {
        let mut url = endpoint(&self.base_url, &["simple", "price"])?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("vs_currencies", currency);
        fetch_json(&self.http_client, url).await
    }
}

fn lookup(table: &PriceTable, id: &str, currency: &str) -> Result<f64> {
    table
        .get(id)
        .and_then(|prices| prices.get(currency))
        .copied()
        .ok_or_else(|| ExplorerError::NotFound(format!("No {currency} price for '{id}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_to_coin_ids() {
        assert_eq!(coin_id("BTC"), Some("bitcoin"));
        assert_eq!(coin_id("pol"), Some("matic-network"));
        assert_eq!(coin_id("doge2"), None);
    }

    #[test]
    fn fiat_detection_ignores_case() {
        assert!(is_fiat("USD"));
        assert!(is_fiat("eur"));
        assert!(!is_fiat("eth"));
    }
}

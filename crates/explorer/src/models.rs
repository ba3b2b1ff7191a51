//! Response shapes of the Blockscout v2 API, BENS and the price API.
//!
//! Blockscout encodes large integers as decimal strings and leaves many
//! fields `null`, so most fields are optional.

use serde::Deserialize;
use std::collections::HashMap;

/// `{ "hash": "0x..." }` as used for senders, recipients and miners
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressRef {
    pub hash: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /addresses/{hash}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressInfo {
    pub hash: String,
    #[serde(default)]
    pub coin_balance: Option<String>,
    #[serde(default)]
    pub is_contract: Option<bool>,
    #[serde(default)]
    pub has_token_transfers: Option<bool>,
    #[serde(default)]
    pub has_tokens: Option<bool>,
    #[serde(default)]
    pub exchange_rate: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_scam: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ens_domain_name: Option<String>,
}

/// `GET /transactions/{hash}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionInfo {
    pub hash: String,
    #[serde(default)]
    pub block_number: Option<u64>,
    /// Older Blockscout releases name the block height `block`
    #[serde(default)]
    pub block: Option<u64>,
    pub from: AddressRef,
    #[serde(default)]
    pub to: Option<AddressRef>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, rename = "type")]
    pub tx_type: Option<u64>,
}

impl TransactionInfo {
    pub fn height(&self) -> Option<u64> {
        self.block_number.or(self.block)
    }
}

/// `GET /blocks/{number}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockInfo {
    pub height: u64,
    pub hash: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub transaction_count: Option<u64>,
    #[serde(default)]
    pub transactions_count: Option<u64>,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub gas_limit: Option<String>,
    #[serde(default)]
    pub gas_used_percentage: Option<f64>,
    #[serde(default)]
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub miner: Option<AddressRef>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub withdrawals_count: Option<u64>,
    #[serde(default)]
    pub burnt_fees: Option<String>,
}

impl BlockInfo {
    pub fn tx_count(&self) -> u64 {
        self.transaction_count
            .or(self.transactions_count)
            .unwrap_or_default()
    }
}

/// `GET /stats`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkStats {
    #[serde(default)]
    pub total_blocks: Option<String>,
    #[serde(default)]
    pub total_addresses: Option<String>,
    #[serde(default)]
    pub total_transactions: Option<String>,
    #[serde(default)]
    pub transactions_today: Option<String>,
    /// Milliseconds
    #[serde(default)]
    pub average_block_time: Option<f64>,
    #[serde(default)]
    pub coin_price: Option<String>,
    #[serde(default)]
    pub network_utilization_percentage: Option<f64>,
}

/// One hit of `GET /search?q=`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_hash: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchItem {
    /// The address-like identifier of the hit, whichever field carries it.
    pub fn target(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or(self.address_hash.as_deref())
            .or(self.transaction_hash.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// BENS `GET /{chain_id}/domains/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainInfo {
    pub name: String,
    #[serde(default)]
    pub resolved_address: Option<AddressRef>,
    #[serde(default)]
    pub owner: Option<AddressRef>,
    #[serde(default)]
    pub wrapped_owner: Option<AddressRef>,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

/// `GET /simple/price`: coin id to currency to price
pub type PriceTable = HashMap<String, HashMap<String, f64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_accepts_either_block_field() {
        let tx: TransactionInfo = serde_json::from_str(
            r#"{"hash":"0x1","block":7,"from":{"hash":"0xa"},"to":null,"type":2}"#,
        )
        .unwrap();
        assert_eq!(tx.height(), Some(7));
        assert!(tx.to.is_none());
        assert_eq!(tx.tx_type, Some(2));
    }

    #[test]
    fn search_target_prefers_address() {
        let item: SearchItem = serde_json::from_str(
            r#"{"type":"token","name":"USD Coin","symbol":"USDC","address_hash":"0xa0b8"}"#,
        )
        .unwrap();
        assert_eq!(item.target(), Some("0xa0b8"));
    }
}

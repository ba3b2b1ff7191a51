//! Wallet access for the Web3 terminal.
//!
//! A [`WalletProvider`] accepts EIP-1193 style `request(method, params)`
//! calls. [`JsonRpcProvider`] forwards them as JSON-RPC 2.0 over HTTP to a
//! local signer such as Frame (`http://127.0.0.1:1248`). [`WalletSession`]
//! holds the provider together with the account connected by `summon`.

pub mod error;
pub mod provider;
pub mod quantity;
pub mod session;

pub use error::{Result, WalletError, USER_REJECTED_CODE};
pub use provider::{JsonRpcProvider, WalletProvider};
pub use quantity::{is_address, parse_quantity, short_address, to_quantity};
pub use session::WalletSession;

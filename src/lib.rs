//! # Web3 Terminal
//!
//! A text-command interpreter for blockchain data. A line such as
//! `address 0xabc… base` is tokenized, resolved against a registry of named
//! commands and handed to an async handler; whatever happens inside the
//! handler comes back as a single block of display text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use web3_terminal::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = TerminalConfig::load_or_default(None)?;
//!     let mut console = build_console(&config)?;
//!
//!     println!("{}", console.dispatch("networks").await);
//!     println!("{}", console.dispatch("help").await);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`console`] - tokenizer, registry, resolver and dispatcher
//! - [`config`] - TOML configuration and command-line overrides
//! - [`explorer`] - Blockscout, ENS and market price clients
//! - [`wallet`] - JSON-RPC wallet provider and per-session wallet state
//! - [`cli`] - the command set and the interactive shell behind `w3t`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use w3t_cli as cli;
pub use w3t_config as config;
pub use w3t_console as console;
pub use w3t_explorer as explorer;
pub use w3t_wallet as wallet;

/// Common imports for embedding the terminal
pub mod prelude {
    pub use crate::cli::{build_console, build_registry, Services, TerminalSession};
    pub use crate::config::{Profile, TerminalConfig};
    pub use crate::console::{
        CommandError, CommandHandler, CommandRegistry, CommandResult, Console, OperationExt,
        RegistryBuilder,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

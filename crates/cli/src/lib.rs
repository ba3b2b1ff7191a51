//! w3t - the Web3 terminal
//!
//! Library half of the `w3t` binary: argument parsing, the session type, the
//! command set and the interactive shell. The binary only wires these
//! together, so everything here can be driven from tests.

pub mod args;
pub mod commands;
pub mod session;
pub mod terminal;

pub use args::CliArgs;
pub use commands::{build_registry, Services};
pub use session::TerminalSession;

use anyhow::Result;
use std::sync::Arc;
use w3t_config::TerminalConfig;
use w3t_console::Console;
use w3t_wallet::WalletSession;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds a console for `config`: shared clients, the profile's registry and
/// a fresh session. Profiles without wallet commands never get a provider.
pub fn build_console(config: &TerminalConfig) -> Result<Console<TerminalSession>> {
    let profile = config.console.profile;
    let services = Arc::new(Services::from_config(config)?);
    let registry = build_registry(profile, services)?;
    let session = if profile.includes_wallet() {
        TerminalSession::from_config(&config.wallet)?
    } else {
        TerminalSession::new(WalletSession::detached())
    };
    Ok(Console::new(registry, session))
}

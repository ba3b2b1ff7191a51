use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use w3t_config::{ConfigOverrides, Profile};

/// Command-line arguments for the Web3 terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "w3t",
    version = env!("CARGO_PKG_VERSION"),
    about = "Web3 terminal - explore chains, resolve names and drive a wallet from the command line",
    long_about = "w3t is an interactive terminal for blockchain data. It queries Blockscout explorers, resolves ENS names, checks market prices and talks to a JSON-RPC wallet such as Frame."
)]
pub struct CliArgs {
    /// Specifies the config file
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "W3T_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default explorer network (eth, arb, base, ...)
    #[arg(short = 'n', long = "network", value_name = "NETWORK")]
    pub network: Option<String>,

    /// JSON-RPC wallet provider, e.g. http://127.0.0.1:1248
    #[arg(short = 'w', long = "wallet-url", value_name = "URL", env = "W3T_WALLET_URL")]
    pub wallet_url: Option<String>,

    /// Command set to expose
    #[arg(long = "profile", value_enum)]
    pub profile: Option<ProfileArg>,

    /// The log level written to stderr
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevel>,

    /// Run a command line and exit; may be repeated
    #[arg(short = 'e', long = "execute", value_name = "LINE")]
    pub execute: Vec<String>,

    /// Do not print the welcome banner
    #[arg(long = "no-banner")]
    pub no_banner: bool,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    /// Explorer, market and wallet commands
    Full,
    /// Read-only commands without a wallet
    Explorer,
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Full => Profile::Full,
            ProfileArg::Explorer => Profile::Explorer,
        }
    }
}

impl CliArgs {
    /// Flags that replace configuration file values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            network: self.network.clone(),
            wallet_url: self.wallet_url.clone(),
            profile: self.profile.map(Profile::from),
            log_level: self.log_level.map(|level| level.as_str().to_string()),
            show_banner: self.no_banner.then_some(false),
        }
    }

    /// One-shot mode runs the `--execute` lines instead of the shell.
    pub fn is_one_shot(&self) -> bool {
        !self.execute.is_empty()
    }
}

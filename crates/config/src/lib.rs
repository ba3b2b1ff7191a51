//! Web3 Terminal Configuration
//!
//! Settings are read from a TOML file. Every section and field has a default,
//! so an absent file or a partial file is valid. Command-line flags are
//! applied on top through [`ConfigOverrides`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Prompt shown by the interactive shell
pub const DEFAULT_PROMPT: &str = "web3@terminal:~$";
/// Explorer network used when a command names none
pub const DEFAULT_EXPLORER_NETWORK: &str = "eth";
/// Blockscout name service endpoint
pub const DEFAULT_ENS_API_URL: &str = "https://bens.services.blockscout.com/api/v1";
/// Market price endpoint
pub const DEFAULT_MARKET_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Wallet prompts wait on a human, so they get more time
pub const DEFAULT_WALLET_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HISTORY_SIZE: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// File name looked up under the user's configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Named deployment of the command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Explorer, market and wallet commands
    #[default]
    Full,
    /// Read-only explorer and market commands, no wallet
    Explorer,
}

impl Profile {
    pub fn includes_wallet(&self) -> bool {
        matches!(self, Profile::Full)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => write!(f, "full"),
            Profile::Explorer => write!(f, "explorer"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "explorer" | "readonly" | "read-only" => Ok(Profile::Explorer),
            other => Err(format!("Unknown profile: {}", other)),
        }
    }
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
    pub profile: Profile,
    /// Number of lines kept for Up/Down recall
    pub history_size: usize,
    pub show_banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            profile: Profile::default(),
            history_size: DEFAULT_HISTORY_SIZE,
            show_banner: true,
        }
    }
}

/// An explorer network added on top of the built-in table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerNetworkConfig {
    /// Key typed on the command line, e.g. `mynet`
    pub key: String,
    pub name: String,
    /// Explorer front-end URL
    pub url: String,
    /// REST API root; defaults to `<url>/api/v2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub symbol: String,
    pub chain_id: u64,
    #[serde(default)]
    pub is_l2: bool,
}

/// Blockscout explorer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub default_network: String,
    pub timeout_secs: u64,
    pub ens_api_url: String,
    pub networks: Vec<ExplorerNetworkConfig>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_network: DEFAULT_EXPLORER_NETWORK.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ens_api_url: DEFAULT_ENS_API_URL.to_string(),
            networks: Vec::new(),
        }
    }
}

impl ExplorerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Market price settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub api_url: String,
    pub vs_currency: String,
    pub timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_MARKET_API_URL.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MarketConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Wallet provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet provider. No provider means the
    /// wallet commands report that no wallet was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            provider_url: None,
            timeout_secs: DEFAULT_WALLET_TIMEOUT_SECS,
        }
    }
}

impl WalletConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `w3t=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub console: ConsoleConfig,
    pub explorer: ExplorerConfig,
    pub market: MarketConfig,
    pub wallet: WalletConfig,
    pub logging: LoggingConfig,
}

/// Values supplied on the command line that win over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub network: Option<String>,
    pub wallet_url: Option<String>,
    pub profile: Option<Profile>,
    pub log_level: Option<String>,
    pub show_banner: Option<bool>,
}

impl TerminalConfig {
    /// Default location: `<config dir>/w3t/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("w3t").join(CONFIG_FILE_NAME))
    }

    /// Reads and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `path` when given; otherwise the default location if a file
    /// exists there; otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(network) = &overrides.network {
            self.explorer.default_network = network.to_ascii_lowercase();
        }
        if let Some(url) = &overrides.wallet_url {
            self.wallet.provider_url = Some(url.clone());
        }
        if let Some(profile) = overrides.profile {
            self.console.profile = profile;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
        if let Some(show_banner) = overrides.show_banner {
            self.console.show_banner = show_banner;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.console.prompt.trim().is_empty() {
            return Err(invalid("console.prompt cannot be empty"));
        }
        if self.explorer.default_network.trim().is_empty() {
            return Err(invalid("explorer.default_network cannot be empty"));
        }
        for (section, secs) in [
            ("explorer", self.explorer.timeout_secs),
            ("market", self.market.timeout_secs),
            ("wallet", self.wallet.timeout_secs),
        ] {
            if secs == 0 {
                return Err(invalid(format!("{section}.timeout_secs must be positive")));
            }
        }

        check_url("explorer.ens_api_url", &self.explorer.ens_api_url)?;
        check_url("market.api_url", &self.market.api_url)?;
        if let Some(url) = &self.wallet.provider_url {
            check_url("wallet.provider_url", url)?;
        }
        if self.market.vs_currency.trim().is_empty() {
            return Err(invalid("market.vs_currency cannot be empty"));
        }

        let mut keys = HashSet::new();
        for network in &self.explorer.networks {
            let key = network.key.trim().to_ascii_lowercase();
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                return Err(invalid(format!(
                    "explorer network key '{}' is not a single word",
                    network.key
                )));
            }
            if !keys.insert(key) {
                return Err(invalid(format!(
                    "explorer network '{}' is defined more than once",
                    network.key
                )));
            }
            check_url(&format!("explorer.networks.{}.url", network.key), &network.url)?;
            if let Some(api_url) = &network.api_url {
                check_url(&format!("explorer.networks.{}.api_url", network.key), api_url)?;
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn check_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|err| invalid(format!("{field}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("{field}: unsupported scheme '{other}'"))),
    }
}

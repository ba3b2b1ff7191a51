use thiserror::Error;

/// EIP-1193 code for a request the user declined in the wallet
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors raised while talking to a wallet provider
#[derive(Error, Debug)]
pub enum WalletError {
    /// No provider URL is configured for this session
    #[error("No Web3 wallet detected. Please configure a wallet provider URL.")]
    NoProvider,

    /// An account is required but `summon` has not run
    #[error("Please use \"summon\" first to connect your wallet")]
    NotConnected,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned a JSON-RPC error object
    #[error("{message} (code {code})")]
    Rpc { code: i64, message: String },

    #[error("User rejected the request.")]
    UserRejected,

    /// The provider answered with something that is not a usable result
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl WalletError {
    /// Maps a JSON-RPC error object, recognising user rejection.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            WalletError::UserRejected
        } else {
            WalletError::Rpc {
                code,
                message: message.into(),
            }
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::InvalidResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_code_maps_to_user_rejected() {
        assert!(matches!(
            WalletError::rpc(4001, "User denied"),
            WalletError::UserRejected
        ));
        assert_eq!(
            WalletError::rpc(-32000, "insufficient funds").to_string(),
            "insufficient funds (code -32000)"
        );
    }
}

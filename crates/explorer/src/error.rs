use thiserror::Error;

/// Errors raised by the explorer, ENS and market clients
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("request failed with status {status}{}", detail(.message))]
    Status {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    /// The body was not the JSON shape we expected
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A network key that is neither built in nor configured
    #[error("Network '{0}' not found.")]
    UnknownNetwork(String),

    /// The response parsed but lacked the requested item
    #[error("{0}")]
    NotFound(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl From<url::ParseError> for ExplorerError {
    fn from(err: url::ParseError) -> Self {
        ExplorerError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

//! Error handling for the liquidity engine and its collaborators
//!
//! The pricing engine itself never fails: degraded conditions (no liquidity,
//! no AMM pool) are reported in its output records. Errors only arise while
//! normalizing a single amount, talking to a ledger node, or loading config.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiquidityError {
    /// An amount in a snapshot could not be parsed; the owning offer is dropped
    #[error("Malformed amount: {0}")]
    MalformedAmount(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The ledger node answered with an error status
    #[error("Ledger RPC error: {0}")]
    RpcResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LiquidityError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            LiquidityError::MalformedAmount(_) => "amount",
            LiquidityError::Network(_) | LiquidityError::RpcResponse(_) => "ledger",
            LiquidityError::Parse(_) => "parse",
            LiquidityError::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for LiquidityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LiquidityError::Parse(err.to_string())
        } else {
            LiquidityError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LiquidityError {
    fn from(err: serde_json::Error) -> Self {
        LiquidityError::Parse(format!("JSON parse error: {}", err))
    }
}

/// Result type alias using LiquidityError
pub type LiquidityResult<T> = Result<T, LiquidityError>;

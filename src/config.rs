// Configuration management for the liquidity engine and quote tooling

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Slippage bound used for depth: offers within `best_rate * (1 + bound)` count
    #[serde(default = "default_depth_slippage")]
    pub depth_slippage: Decimal,
    /// Trade size (in the paid asset) used when a query does not name one
    #[serde(default = "default_trade_size")]
    pub default_trade_size: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_book_limit")]
    pub book_limit: u32,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_rate_precision")]
    pub rate_precision: u32,
    #[serde(default = "default_depth_precision")]
    pub depth_precision: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_depth_slippage() -> Decimal { dec!(0.05) }
fn default_trade_size() -> Decimal { dec!(15) }
fn default_rpc_url() -> String { "https://s1.ripple.com:51234/".to_string() }
fn default_book_limit() -> u32 { 100 }
fn default_request_timeout_ms() -> u64 { 10_000 }
fn default_debounce_ms() -> u64 { 400 }
fn default_rate_precision() -> u32 { 8 }
fn default_depth_precision() -> u32 { 2 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth_slippage: default_depth_slippage(),
            default_trade_size: default_trade_size(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            book_limit: default_book_limit(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rate_precision: default_rate_precision(),
            depth_precision: default_depth_precision(),
        }
    }
}

impl LedgerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl QuoteConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            info!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.depth_slippage.is_sign_negative() {
            return Err(ConfigError::Validation("depth_slippage must be non-negative".to_string()));
        }

        if self.engine.default_trade_size <= Decimal::ZERO {
            return Err(ConfigError::Validation("default_trade_size must be positive".to_string()));
        }

        if self.ledger.rpc_url.trim().is_empty() {
            return Err(ConfigError::Validation("rpc_url must not be empty".to_string()));
        }

        if self.ledger.book_limit == 0 {
            return Err(ConfigError::Validation("book_limit must be greater than 0".to_string()));
        }

        if self.ledger.request_timeout_ms == 0 {
            return Err(ConfigError::Validation("request_timeout_ms must be greater than 0".to_string()));
        }

        if self.display.rate_precision > 28 || self.display.depth_precision > 28 {
            return Err(ConfigError::Validation("display precision cannot exceed 28 digits".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

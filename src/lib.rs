// Ledger Liquidity Library
//
// Order-book / AMM liquidity aggregation and trade simulation for ledger DEX pairs

pub mod types;
pub mod error;       // Unified error handling
pub mod config;
pub mod simulation;  // Pure pricing engine
pub mod clients;
pub mod quote_service;

// Re-export core types
pub use types::{AmountValue, AmmSnapshot, BookOfferSnapshot, BookSide, Issue, LpToken, Offer, PoolSnapshot, RawAmount};

// Re-export error types
pub use error::{LiquidityError, LiquidityResult};

// Re-export configuration
pub use config::{Config, ConfigError, DisplayConfig, EngineConfig, LedgerConfig, QuoteConfig};

// Re-export engine components
pub use simulation::{
    ExecutionResult, ExecutionSimulator, LiquidityEngine, MarketQuote, MergedBook, SpreadAnalysis,
    SpreadAnalyzer, VolatilityAnalyzer, VolatilityStats,
};

// Re-export client and service types
pub use clients::LedgerRpcClient;
pub use quote_service::{LiquiditySource, QuoteRequest, QuoteService, QuoteUpdate};

// Liquidity Simulation Module
// Order-book / AMM aggregation and trade simulation; pure and synchronous

pub mod amount;
pub mod amm;
pub mod order_book;
pub mod execution_simulator;
pub mod spread;
pub mod volatility;
pub mod simulation_engine;

pub use amount::{normalize, DROPS_PER_NATIVE};
pub use amm::{synthesize_from_snapshot, synthesize_offer};
pub use order_book::MergedBook;
pub use execution_simulator::{ExecutionSimulator, ExecutionResult, ExecutionConfig};
pub use spread::{SpreadAnalyzer, SpreadAnalysis};
pub use volatility::{VolatilityAnalyzer, VolatilityStats};
pub use simulation_engine::{LiquidityEngine, MarketQuote};

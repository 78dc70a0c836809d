// Liquidity Engine
// Coordinates normalization, AMM synthesis, merging, execution and spread analysis

use crate::config::EngineConfig;
use crate::simulation::amm::synthesize_from_snapshot;
use crate::simulation::execution_simulator::{ExecutionConfig, ExecutionResult, ExecutionSimulator};
use crate::simulation::order_book::MergedBook;
use crate::simulation::spread::{SpreadAnalysis, SpreadAnalyzer};
use crate::types::{AmmSnapshot, BookOfferSnapshot, BookSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the engine derives for one trade-size / pair query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub side: BookSide,
    pub trade_size: Decimal,
    pub execution: ExecutionResult,
    pub spread: SpreadAnalysis,
    pub offers_considered: usize,
    pub offers_skipped: usize,
    pub synthetic_included: bool,
}

/// Stateless pricing engine; every call works on its own inputs
#[derive(Debug, Clone, Default)]
pub struct LiquidityEngine {
    simulator: ExecutionSimulator,
}

impl LiquidityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            simulator: ExecutionSimulator::new(ExecutionConfig {
                depth_slippage: config.depth_slippage,
            }),
        }
    }

    /// Build the ranked book for `side` from a raw snapshot and an optional pool
    pub fn merged_book(
        &self,
        side: &BookSide,
        offers: &[BookOfferSnapshot],
        amm: Option<&AmmSnapshot>,
    ) -> MergedBook {
        MergedBook::from_snapshots(offers, synthesize_from_snapshot(amm, side))
    }

    /// Quote spending `trade_size` of `side.pays` to receive `side.gets`.
    ///
    /// `forward` is the book for `side`, `inverse` the book for
    /// `side.inverse()`; both share the same optional pool snapshot.
    pub fn quote(
        &self,
        side: &BookSide,
        trade_size: Decimal,
        forward: &[BookOfferSnapshot],
        inverse: &[BookOfferSnapshot],
        amm: Option<&AmmSnapshot>,
    ) -> MarketQuote {
        let forward_book = self.merged_book(side, forward, amm);
        let inverse_book = self.merged_book(&side.inverse(), inverse, amm);

        let execution = self.simulator.simulate(&forward_book, trade_size);
        let spread = SpreadAnalyzer::analyze(&forward_book, &inverse_book);

        debug!(
            "📊 {} size {}: received {} spent {} vwap {} spread {}% ({} offers, amm: {})",
            side,
            trade_size,
            execution.received_total,
            execution.spent_total,
            execution.vwap,
            spread.spread_percent.round_dp(4),
            forward_book.len(),
            forward_book.has_synthetic()
        );

        MarketQuote {
            side: side.clone(),
            trade_size,
            offers_considered: forward_book.len(),
            offers_skipped: forward_book.skipped(),
            synthetic_included: forward_book.has_synthetic(),
            execution,
            spread,
        }
    }
}

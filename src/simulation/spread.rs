// Spread and Liquidity Analyzer
// Compares the best offers of a book and its inverse

use crate::simulation::order_book::MergedBook;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Spread between a book and its inverse, expressed in forward-rate units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadAnalysis {
    pub best_forward_rate: Decimal,
    pub best_inverse_rate: Decimal,
    pub best_inverse_as_forward: Decimal,
    pub spread: Decimal,
    pub mid_price: Decimal,
    pub spread_percent: Decimal,
    /// Forward gets volume over inverse gets volume
    pub liquidity_ratio: Decimal,
}

pub struct SpreadAnalyzer;

impl SpreadAnalyzer {
    /// `forward` receives A paying B; `inverse` receives B paying A.
    ///
    /// Missing sides degrade to zero rather than failing.
    pub fn analyze(forward: &MergedBook, inverse: &MergedBook) -> SpreadAnalysis {
        let best_forward_rate = forward.best_rate().unwrap_or(Decimal::ZERO);
        let best_inverse_rate = inverse.best_rate().unwrap_or(Decimal::ZERO);

        // A vanishing inverse rate has no representable reciprocal; treat that side as absent
        let best_inverse_as_forward = if best_inverse_rate.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE.checked_div(best_inverse_rate).unwrap_or(Decimal::ZERO)
        };

        let both_sides = !best_forward_rate.is_zero() && !best_inverse_as_forward.is_zero();
        let spread = if both_sides {
            (best_forward_rate - best_inverse_as_forward).abs()
        } else {
            Decimal::ZERO
        };

        let mid_price = best_forward_rate / dec!(2) + best_inverse_as_forward / dec!(2);
        let spread_percent = if mid_price > Decimal::ZERO {
            spread
                .checked_div(mid_price)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        SpreadAnalysis {
            best_forward_rate,
            best_inverse_rate,
            best_inverse_as_forward,
            spread,
            mid_price,
            spread_percent,
            liquidity_ratio: Self::liquidity_ratio(forward, inverse),
        }
    }

    /// Gets-side volume of `selling` over that of `other`, zero when `other` is
    /// empty and saturating at `Decimal::MAX`
    pub fn liquidity_ratio(selling: &MergedBook, other: &MergedBook) -> Decimal {
        let denominator = other.total_gets();
        if denominator.is_zero() {
            Decimal::ZERO
        } else {
            selling.total_gets().checked_div(denominator).unwrap_or(Decimal::MAX)
        }
    }
}

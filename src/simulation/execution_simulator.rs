// Execution Simulator
// Walks a merged book to simulate spending a fixed amount of the paid asset

use crate::simulation::order_book::MergedBook;
use crate::simulation::volatility::VolatilityAnalyzer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Result of a simulated execution.
///
/// `vwap`, `best_rate` and `worst_rate` are in received-per-paid units (higher
/// is better). `execution_price` is the realized paid-per-received average,
/// comparable with `Offer::rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub received_total: Decimal,
    pub spent_total: Decimal,
    pub vwap: Decimal,
    pub best_rate: Decimal,
    pub worst_rate: Decimal,
    /// Gets-side volume within the depth slippage bound
    pub depth_received: Decimal,
    /// Pays-side volume within the depth slippage bound
    pub depth_spent: Decimal,
    pub execution_price: Decimal,
    pub insufficient_liquidity: bool,
    pub volatility: Decimal,
    pub volatility_percent: Decimal,
    pub offers_consumed: usize,
}

/// Execution simulator configuration
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Fractional bound over the best rate used for the depth pass (0.05 = 5%)
    pub depth_slippage: Decimal,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            depth_slippage: dec!(0.05),
        }
    }
}

/// Execution simulator
#[derive(Debug, Clone, Default)]
pub struct ExecutionSimulator {
    config: ExecutionConfig,
}

impl ExecutionSimulator {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(ExecutionConfig::default())
    }

    /// Simulate spending `target_spend` of the paid asset against `book`.
    ///
    /// Offers are consumed best-first until the target is spent or the book
    /// runs out. Never fails: an illiquid book yields zero totals with
    /// `insufficient_liquidity` set.
    pub fn simulate(&self, book: &MergedBook, target_spend: Decimal) -> ExecutionResult {
        let mut remaining = target_spend.max(Decimal::ZERO);
        let mut received_total = Decimal::ZERO;
        let mut spent_total = Decimal::ZERO;
        let mut best_rate: Option<Decimal> = None;
        let mut worst_rate: Option<Decimal> = None;
        let mut offers_consumed = 0;

        for offer in book.offers() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let available = offer.pays_amount.decimal;
            if available <= Decimal::ZERO {
                continue;
            }

            let Some(realized) = offer.gets_amount.decimal.checked_div(available) else {
                warn!("⚠️  Skipping offer at rate {}: realized rate out of range", offer.rate);
                continue;
            };

            let use_spend = remaining.min(available);
            // Scale by the consumed fraction so a partial fill never exceeds the offer's gets leg
            let received = if use_spend == available {
                offer.gets_amount.decimal
            } else {
                (use_spend / available)
                    .saturating_mul(offer.gets_amount.decimal)
                    .min(offer.gets_amount.decimal)
            };

            let Some(next_received) = received_total.checked_add(received) else {
                warn!("⚠️  Received total out of range, stopping the walk at {}", received_total);
                break;
            };

            received_total = next_received;
            spent_total += use_spend;
            remaining -= use_spend;
            offers_consumed += 1;

            best_rate = Some(best_rate.map_or(realized, |best| best.max(realized)));
            worst_rate = Some(worst_rate.map_or(realized, |worst| worst.min(realized)));
        }

        let vwap = ratio_or_zero(received_total, spent_total);
        let execution_price = ratio_or_zero(spent_total, received_total);

        let (depth_received, depth_spent) = self.depth_within_slippage(book);
        let volatility = VolatilityAnalyzer::analyze(&book.rates());

        ExecutionResult {
            received_total,
            spent_total,
            vwap,
            best_rate: best_rate.unwrap_or(Decimal::ZERO),
            worst_rate: worst_rate.unwrap_or(Decimal::ZERO),
            depth_received,
            depth_spent,
            execution_price,
            insufficient_liquidity: remaining > Decimal::ZERO || book.is_empty(),
            volatility: volatility.std_dev,
            volatility_percent: volatility.volatility_percent,
            offers_consumed,
        }
    }

    /// Sum both legs of every offer priced within the slippage bound of the best rate
    pub fn depth_within_slippage(&self, book: &MergedBook) -> (Decimal, Decimal) {
        let Some(best) = book.best_rate() else {
            return (Decimal::ZERO, Decimal::ZERO);
        };
        let max_quality = best.saturating_mul(Decimal::ONE + self.config.depth_slippage);

        book.offers()
            .iter()
            .take_while(|offer| offer.rate <= max_quality)
            .fold((Decimal::ZERO, Decimal::ZERO), |(received, spent), offer| {
                (
                    received.saturating_add(offer.gets_amount.decimal),
                    spent.saturating_add(offer.pays_amount.decimal),
                )
            })
    }
}

/// `numerator / denominator`, zero for an empty denominator or an
/// unrepresentable quotient
fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        warn!("⚠️  Ratio {} / {} out of range, reporting zero", numerator, denominator);
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AmountValue, Offer};

    fn offer(gets: Decimal, pays: Decimal) -> Offer {
        Offer::new(
            AmountValue { currency_id: "TOKEN".into(), issuer: Some("rIssuer".into()), decimal: gets },
            AmountValue { currency_id: "XRP".into(), issuer: None, decimal: pays },
            false,
        )
        .unwrap()
    }

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.001)
    }

    #[test]
    fn test_partial_second_offer() {
        let book = MergedBook::merge(vec![offer(dec!(100), dec!(10)), offer(dec!(50), dec!(6))], None);
        let result = ExecutionSimulator::with_default_config().simulate(&book, dec!(12));

        assert!(close(result.received_total, dec!(116.667)));
        assert_eq!(result.spent_total, dec!(12));
        assert!(!result.insufficient_liquidity);
        assert_eq!(result.offers_consumed, 2);
        assert_eq!(result.best_rate, dec!(10));
        assert!(close(result.worst_rate, dec!(8.333)));
        assert!(close(result.vwap, dec!(9.722)));
    }

    #[test]
    fn test_stops_once_target_spent() {
        let book = MergedBook::merge(vec![offer(dec!(100), dec!(10)), offer(dec!(50), dec!(6))], None);
        let result = ExecutionSimulator::with_default_config().simulate(&book, dec!(10));

        assert_eq!(result.received_total, dec!(100));
        assert_eq!(result.offers_consumed, 1);
        assert_eq!(result.best_rate, result.worst_rate);
        assert_eq!(result.execution_price, dec!(0.1));
    }

    #[test]
    fn test_empty_book() {
        let result = ExecutionSimulator::with_default_config().simulate(&MergedBook::default(), dec!(15));

        assert_eq!(result.received_total, Decimal::ZERO);
        assert_eq!(result.spent_total, Decimal::ZERO);
        assert_eq!(result.vwap, Decimal::ZERO);
        assert_eq!(result.best_rate, Decimal::ZERO);
        assert_eq!(result.worst_rate, Decimal::ZERO);
        assert_eq!(result.depth_received, Decimal::ZERO);
        assert!(result.insufficient_liquidity);
    }

    #[test]
    fn test_zero_pays_offer_is_skipped() {
        let mut free = offer(dec!(10), dec!(1));
        free.pays_amount.decimal = Decimal::ZERO;
        free.rate = Decimal::ZERO;
        let book = MergedBook::merge(vec![free, offer(dec!(100), dec!(10))], None);
        let result = ExecutionSimulator::with_default_config().simulate(&book, dec!(5));

        assert_eq!(result.received_total, dec!(50));
        assert_eq!(result.offers_consumed, 1);
    }

    #[test]
    fn test_received_overflow_stops_walk() {
        let huge = offer(Decimal::MAX, dec!(10000000000));
        let book = MergedBook::merge(vec![huge.clone(), huge], None);
        let result = ExecutionSimulator::with_default_config().simulate(&book, dec!(20000000000));

        assert_eq!(result.received_total, Decimal::MAX);
        assert_eq!(result.spent_total, dec!(10000000000));
        assert_eq!(result.offers_consumed, 1);
        assert!(result.insufficient_liquidity);
        assert_eq!(result.depth_received, Decimal::MAX);
    }

    #[test]
    fn test_depth_within_slippage() {
        let book = MergedBook::merge(
            vec![
                offer(dec!(100), dec!(10)),  // rate 0.1
                offer(dec!(100), dec!(10.4)), // rate 0.104, inside 5%
                offer(dec!(100), dec!(11)),  // rate 0.11, outside
            ],
            None,
        );
        let simulator = ExecutionSimulator::with_default_config();
        assert_eq!(simulator.depth_within_slippage(&book), (dec!(200), dec!(20.4)));

        let wide = ExecutionSimulator::new(ExecutionConfig { depth_slippage: dec!(0.2) });
        assert_eq!(wide.depth_within_slippage(&book), (dec!(300), dec!(31.4)));
    }
}

// Volatility Analyzer
// Dispersion of per-offer rates across a merged book

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityStats {
    pub mean: Decimal,
    /// Population standard deviation
    pub std_dev: Decimal,
    pub volatility_percent: Decimal,
    pub samples: usize,
}

pub struct VolatilityAnalyzer;

impl VolatilityAnalyzer {
    /// Mean and population standard deviation of `rates`; all zeros when empty.
    ///
    /// A book mixing ordinary offers with dust at extreme rates can push the
    /// squared deviations past `Decimal::MAX`. Dispersion is then reported
    /// as zero and logged; the mean is still returned.
    pub fn analyze(rates: &[Decimal]) -> VolatilityStats {
        if rates.is_empty() {
            return VolatilityStats::default();
        }

        let count = Decimal::from(rates.len());
        let mean = Self::mean(rates, count);

        let std_dev = match Self::variance(rates, mean, count) {
            Some(variance) => variance.sqrt().unwrap_or_else(|| {
                warn!("⚠️  No square root for variance {}, reporting zero volatility", variance);
                Decimal::ZERO
            }),
            None => {
                warn!(
                    "⚠️  Rate dispersion out of range over {} offers, reporting zero volatility",
                    rates.len()
                );
                Decimal::ZERO
            }
        };

        let volatility_percent = if mean > Decimal::ZERO {
            std_dev
                .checked_div(mean)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        VolatilityStats {
            mean,
            std_dev,
            volatility_percent,
            samples: rates.len(),
        }
    }

    fn mean(rates: &[Decimal], count: Decimal) -> Decimal {
        match rates.iter().try_fold(Decimal::ZERO, |sum, rate| sum.checked_add(*rate)) {
            Some(sum) => sum / count,
            // Scale each term down first; every share fits once divided
            None => rates
                .iter()
                .fold(Decimal::ZERO, |sum, rate| sum.saturating_add(*rate / count)),
        }
    }

    fn variance(rates: &[Decimal], mean: Decimal, count: Decimal) -> Option<Decimal> {
        let squares = rates.iter().try_fold(Decimal::ZERO, |sum, rate| {
            let deviation = rate.checked_sub(mean)?;
            sum.checked_add(deviation.checked_mul(deviation)?)
        })?;
        Some(squares / count)
    }
}

// AMM Virtual Offer Synthesizer
// Turns a pool snapshot into one synthetic offer at the pool's spot rate

use crate::error::LiquidityResult;
use crate::simulation::amount::normalize;
use crate::types::{AmmSnapshot, BookSide, Offer, PoolSnapshot};
use tracing::{debug, warn};

impl PoolSnapshot {
    /// Normalize both pool reserves from a ledger `amm_info` snapshot
    pub fn from_snapshot(snapshot: &AmmSnapshot) -> LiquidityResult<Self> {
        Ok(Self {
            reserve_a: normalize(&snapshot.amount)?,
            reserve_b: normalize(&snapshot.amount2)?,
            trading_fee_bps: snapshot.trading_fee,
        })
    }
}

/// Build the synthetic offer for `side` from a normalized pool.
///
/// The reserve matching `side.gets` becomes the offer's gets leg and the
/// other reserve its pays leg, so the rate is the pool's marginal price for
/// the taker. This is a spot-price approximation: price impact along the
/// pool curve is not modeled and the trading fee is not applied.
///
/// Returns `None` when either reserve is zero or the pool does not trade
/// the two assets of `side`.
pub fn synthesize_offer(pool: &PoolSnapshot, side: &BookSide) -> Option<Offer> {
    let (gets, pays) = if pool.reserve_a.issue() == side.gets && pool.reserve_b.issue() == side.pays {
        (&pool.reserve_a, &pool.reserve_b)
    } else if pool.reserve_b.issue() == side.gets && pool.reserve_a.issue() == side.pays {
        (&pool.reserve_b, &pool.reserve_a)
    } else {
        warn!(
            "AMM pool {}/{} does not match book {}, ignoring it",
            pool.reserve_a.issue(),
            pool.reserve_b.issue(),
            side
        );
        return None;
    };

    if gets.is_zero() || pays.is_zero() {
        debug!("AMM pool for {} has an empty reserve", side);
        return None;
    }

    Offer::new(gets.clone(), pays.clone(), true)
}

/// Synthesize from an optional raw snapshot.
///
/// A missing pool is the normal "no AMM for this pair" case. A snapshot whose
/// reserves fail to parse is treated the same way.
pub fn synthesize_from_snapshot(snapshot: Option<&AmmSnapshot>, side: &BookSide) -> Option<Offer> {
    let snapshot = snapshot?;
    match PoolSnapshot::from_snapshot(snapshot) {
        Ok(pool) => synthesize_offer(&pool, side),
        Err(e) => {
            warn!("Ignoring AMM snapshot for {}: {}", side, e);
            None
        }
    }
}

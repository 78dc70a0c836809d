// Offer Book Merger
// Merges standing ledger offers with the synthetic AMM offer into one rate-ranked book

use crate::simulation::amount::normalize;
use crate::types::{BookOfferSnapshot, Offer};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Offers ranked ascending by rate (best price for the taker first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedBook {
    offers: Vec<Offer>,
    skipped: usize,
}

impl MergedBook {
    /// Merge normalized standing offers with an optional synthetic offer.
    ///
    /// Offers with a zero gets leg are excluded, as are offers whose
    /// received-per-paid ratio does not fit a `Decimal` (dust priced at a
    /// vanishing rate), since no fill against them can be represented.
    /// The sort is stable and the
    /// synthetic offer is appended before sorting, so it never jumps ahead of
    /// a standing offer with the same rate.
    pub fn merge(standing: Vec<Offer>, synthetic: Option<Offer>) -> Self {
        let total = standing.len() + usize::from(synthetic.is_some());

        let mut offers: Vec<Offer> = standing
            .into_iter()
            .chain(synthetic)
            .filter(|offer| !offer.gets_amount.is_zero())
            .filter(|offer| {
                let representable = offer.pays_amount.is_zero()
                    || offer.gets_amount.decimal.checked_div(offer.pays_amount.decimal).is_some();
                if !representable {
                    warn!(
                        "⚠️  Skipping offer {} for {}: rate out of range",
                        offer.gets_amount.decimal, offer.pays_amount.decimal
                    );
                }
                representable
            })
            .collect();
        let skipped = total - offers.len();

        offers.sort_by(|a, b| a.rate.cmp(&b.rate));

        Self { offers, skipped }
    }

    /// Normalize a raw ledger snapshot and merge it with the synthetic offer.
    ///
    /// An offer whose amounts fail to parse is logged and dropped; the rest of
    /// the book is still used.
    pub fn from_snapshots(raw: &[BookOfferSnapshot], synthetic: Option<Offer>) -> Self {
        let mut malformed = 0;
        let mut standing = Vec::with_capacity(raw.len());

        for (index, entry) in raw.iter().enumerate() {
            let legs = normalize(&entry.taker_gets).and_then(|gets| {
                normalize(&entry.taker_pays).map(|pays| (gets, pays))
            });

            match legs {
                Ok((gets, pays)) => match Offer::new(gets, pays, false) {
                    Some(offer) => standing.push(offer),
                    None => {
                        debug!("Skipping offer #{} with zero gets amount", index);
                        malformed += 1;
                    }
                },
                Err(e) => {
                    warn!("⚠️  Skipping offer #{}: {}", index, e);
                    malformed += 1;
                }
            }
        }

        let mut book = Self::merge(standing, synthetic);
        book.skipped += malformed;
        book
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Raw offers dropped for a malformed amount, a zero gets leg or an
    /// unrepresentable rate
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Best (lowest-rate) offer
    pub fn best(&self) -> Option<&Offer> {
        self.offers.first()
    }

    pub fn best_rate(&self) -> Option<Decimal> {
        self.best().map(|offer| offer.rate)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn has_synthetic(&self) -> bool {
        self.offers.iter().any(|offer| offer.is_synthetic)
    }

    pub fn rates(&self) -> Vec<Decimal> {
        self.offers.iter().map(|offer| offer.rate).collect()
    }

    /// Total of the gets legs across the book, saturating at `Decimal::MAX`
    pub fn total_gets(&self) -> Decimal {
        saturating_total(self.offers.iter().map(|offer| offer.gets_amount.decimal))
    }

    /// Total of the pays legs across the book, saturating at `Decimal::MAX`
    pub fn total_pays(&self) -> Decimal {
        saturating_total(self.offers.iter().map(|offer| offer.pays_amount.decimal))
    }
}

fn saturating_total(legs: impl Iterator<Item = Decimal>) -> Decimal {
    legs.fold(Decimal::ZERO, |total, leg| total.saturating_add(leg))
}

// Common types shared by the liquidity engine, the ledger client and the quote service

use crate::error::LiquidityError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency code of the ledger's native asset
pub const NATIVE_CURRENCY: &str = "XRP";

/// Identity of an asset: currency code plus issuing account (none for the native asset)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl Issue {
    pub fn native() -> Self {
        Self {
            currency: NATIVE_CURRENCY.to_string(),
            issuer: None,
        }
    }

    pub fn issued(currency: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            issuer: Some(issuer.into()),
        }
    }

    pub fn is_native(&self) -> bool {
        self.currency == NATIVE_CURRENCY && self.issuer.is_none()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issuer {
            Some(issuer) => write!(f, "{}.{}", self.currency, issuer),
            None => write!(f, "{}", self.currency),
        }
    }
}

/// Parses `XRP` or `CUR.rIssuer`
impl FromStr for Issue {
    type Err = LiquidityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LiquidityError::Parse("empty asset identifier".to_string()));
        }

        match s.split_once('.') {
            Some((currency, issuer)) if !currency.is_empty() && !issuer.is_empty() => {
                Ok(Issue::issued(currency, issuer))
            }
            Some(_) => Err(LiquidityError::Parse(format!("invalid asset identifier: {}", s))),
            None if s.eq_ignore_ascii_case(NATIVE_CURRENCY) => Ok(Issue::native()),
            None => Err(LiquidityError::Parse(format!(
                "issued asset {} needs an issuer (CUR.rIssuer)",
                s
            ))),
        }
    }
}

/// Ledger-style amount as it appears in order-book and AMM snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Native amount as an integer string of minor units (drops)
    Native(String),
    /// Issued currency amount with a decimal string value
    Issued {
        currency: String,
        #[serde(default)]
        issuer: Option<String>,
        value: String,
    },
}

/// Normalized amount: asset identity plus decimal value in major units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountValue {
    pub currency_id: String,
    pub issuer: Option<String>,
    pub decimal: Decimal,
}

impl AmountValue {
    pub fn issue(&self) -> Issue {
        Issue {
            currency: self.currency_id.clone(),
            issuer: self.issuer.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.decimal.is_zero()
    }
}

/// A standing (or synthetic) offer after normalization.
///
/// `gets_amount` is what the taker receives, `pays_amount` what the taker pays.
/// `rate` is paid-per-received, so lower is better for the taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub gets_amount: AmountValue,
    pub pays_amount: AmountValue,
    pub is_synthetic: bool,
    pub rate: Decimal,
}

impl Offer {
    /// Builds an offer, or `None` when `gets_amount` is zero and the rate is undefined
    pub fn new(gets_amount: AmountValue, pays_amount: AmountValue, is_synthetic: bool) -> Option<Self> {
        if gets_amount.is_zero() {
            return None;
        }
        let rate = pays_amount.decimal.checked_div(gets_amount.decimal)?;
        Some(Self {
            gets_amount,
            pays_amount,
            is_synthetic,
            rate,
        })
    }
}

/// One offer of a raw order-book snapshot, ledger field names preserved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookOfferSnapshot {
    #[serde(rename = "TakerGets")]
    pub taker_gets: RawAmount,
    #[serde(rename = "TakerPays")]
    pub taker_pays: RawAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpToken {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

/// AMM pool state as reported by the ledger's `amm_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmSnapshot {
    pub amount: RawAmount,
    pub amount2: RawAmount,
    #[serde(default)]
    pub lp_token: Option<LpToken>,
    #[serde(default)]
    pub trading_fee: u32,
}

/// Normalized pool reserves, read-only for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserve_a: AmountValue,
    pub reserve_b: AmountValue,
    pub trading_fee_bps: u32,
}

/// Direction of a book: the taker receives `gets` and pays `pays`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookSide {
    pub gets: Issue,
    pub pays: Issue,
}

impl BookSide {
    pub fn new(gets: Issue, pays: Issue) -> Self {
        Self { gets, pays }
    }

    pub fn inverse(&self) -> Self {
        Self {
            gets: self.pays.clone(),
            pays: self.gets.clone(),
        }
    }
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.gets, self.pays)
    }
}

// Amount Normalizer
// Converts ledger amounts (native drops or issued decimal values) into AmountValue

use crate::error::{LiquidityError, LiquidityResult};
use crate::types::{AmountValue, RawAmount, NATIVE_CURRENCY};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Minor units (drops) per unit of the native asset
pub const DROPS_PER_NATIVE: Decimal = dec!(1000000);

/// Normalize a raw ledger amount.
///
/// Native amounts are integer strings of drops and are divided by 10^6.
/// Issued amounts keep their currency and issuer and pass the value through.
/// Negative or unparsable values fail with `MalformedAmount`.
pub fn normalize(raw: &RawAmount) -> LiquidityResult<AmountValue> {
    match raw {
        RawAmount::Native(drops) => {
            let drops = parse_drops(drops)?;
            Ok(AmountValue {
                currency_id: NATIVE_CURRENCY.to_string(),
                issuer: None,
                decimal: drops / DROPS_PER_NATIVE,
            })
        }
        RawAmount::Issued { currency, issuer, value } => {
            let decimal = parse_issued_value(value)?;
            Ok(AmountValue {
                currency_id: currency.clone(),
                issuer: issuer.clone(),
                decimal,
            })
        }
    }
}

fn parse_drops(drops: &str) -> LiquidityResult<Decimal> {
    let trimmed = drops.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LiquidityError::MalformedAmount(format!(
            "native amount is not an integer drop count: {:?}",
            drops
        )));
    }

    Decimal::from_str(trimmed)
        .map_err(|e| LiquidityError::MalformedAmount(format!("native amount {:?}: {}", drops, e)))
}

// The ledger renders very small or very large issued values in scientific notation
fn parse_issued_value(value: &str) -> LiquidityResult<Decimal> {
    let trimmed = value.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(&trimmed.to_ascii_lowercase())
    } else {
        Decimal::from_str(trimmed)
    };

    let decimal = parsed
        .map_err(|e| LiquidityError::MalformedAmount(format!("issued value {:?}: {}", value, e)))?;

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(LiquidityError::MalformedAmount(format!(
            "issued value must not be negative: {}",
            value
        )));
    }

    Ok(decimal.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued(value: &str) -> RawAmount {
        RawAmount::Issued {
            currency: "USD".to_string(),
            issuer: Some("rIssuer".to_string()),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_native_drops_conversion() {
        let amount = normalize(&RawAmount::Native("12345678".to_string())).unwrap();
        assert_eq!(amount.currency_id, "XRP");
        assert_eq!(amount.issuer, None);
        assert_eq!(amount.decimal, dec!(12.345678));
    }

    #[test]
    fn test_native_round_trip() {
        for drops in ["0", "1", "999999", "1000000", "100000000000000000"] {
            let amount = normalize(&RawAmount::Native(drops.to_string())).unwrap();
            assert_eq!(amount.decimal * DROPS_PER_NATIVE, Decimal::from_str(drops).unwrap());
        }
    }

    #[test]
    fn test_issued_passthrough() {
        let amount = normalize(&issued("1.5")).unwrap();
        assert_eq!(amount.currency_id, "USD");
        assert_eq!(amount.issuer.as_deref(), Some("rIssuer"));
        assert_eq!(amount.decimal, dec!(1.5));
    }

    #[test]
    fn test_issued_scientific_notation() {
        let amount = normalize(&issued("1.2e-5")).unwrap();
        assert_eq!(amount.decimal, dec!(0.000012));

        let amount = normalize(&issued("3E2")).unwrap();
        assert_eq!(amount.decimal, dec!(300));
    }

    #[test]
    fn test_malformed_amounts() {
        for bad in ["", "abc", "1.5", "-10", "10 drops"] {
            let result = normalize(&RawAmount::Native(bad.to_string()));
            assert!(matches!(result, Err(LiquidityError::MalformedAmount(_))), "accepted {:?}", bad);
        }

        for bad in ["", "NaN", "1..2", "-3"] {
            let result = normalize(&issued(bad));
            assert!(matches!(result, Err(LiquidityError::MalformedAmount(_))), "accepted {:?}", bad);
        }
    }
}

// Common test utilities and helpers
#![allow(dead_code)]

use ledger_liquidity::{
    AmmSnapshot, AmountValue, BookOfferSnapshot, BookSide, Config, Issue, Offer, RawAmount,
};
use rand::Rng;
use rust_decimal::Decimal;

pub const ISSUER: &str = "rTokenIssuerXXXXXXXXXXXXXXXXXXXXX";

pub fn token() -> Issue {
    Issue::issued("TOKEN", ISSUER)
}

/// Taker receives TOKEN and pays XRP
pub fn token_side() -> BookSide {
    BookSide::new(token(), Issue::native())
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.ledger.rpc_url = "http://127.0.0.1:51234/".to_string();
    config.quote.debounce_ms = 50;
    config
}

pub fn drops(xrp: Decimal) -> String {
    (xrp * Decimal::from(1_000_000)).normalize().to_string()
}

/// Raw offer: receive `tokens` TOKEN for `xrp` XRP
pub fn token_for_xrp(tokens: Decimal, xrp: Decimal) -> BookOfferSnapshot {
    BookOfferSnapshot {
        taker_gets: RawAmount::Issued {
            currency: "TOKEN".to_string(),
            issuer: Some(ISSUER.to_string()),
            value: tokens.to_string(),
        },
        taker_pays: RawAmount::Native(drops(xrp)),
    }
}

/// Raw offer: receive `xrp` XRP for `tokens` TOKEN
pub fn xrp_for_token(xrp: Decimal, tokens: Decimal) -> BookOfferSnapshot {
    BookOfferSnapshot {
        taker_gets: RawAmount::Native(drops(xrp)),
        taker_pays: RawAmount::Issued {
            currency: "TOKEN".to_string(),
            issuer: Some(ISSUER.to_string()),
            value: tokens.to_string(),
        },
    }
}

/// Pool holding `tokens` TOKEN and `xrp` XRP
pub fn token_pool(tokens: Decimal, xrp: Decimal) -> AmmSnapshot {
    AmmSnapshot {
        amount: RawAmount::Issued {
            currency: "TOKEN".to_string(),
            issuer: Some(ISSUER.to_string()),
            value: tokens.to_string(),
        },
        amount2: RawAmount::Native(drops(xrp)),
        lp_token: None,
        trading_fee: 500,
    }
}

pub fn normalized_offer(gets: Decimal, pays: Decimal) -> Offer {
    Offer::new(
        AmountValue {
            currency_id: "TOKEN".to_string(),
            issuer: Some(ISSUER.to_string()),
            decimal: gets,
        },
        AmountValue {
            currency_id: "XRP".to_string(),
            issuer: None,
            decimal: pays,
        },
        false,
    )
    .expect("non-zero gets")
}

/// Random standing offers with whole-drop XRP legs and positive token legs
pub fn generate_random_offers(count: usize) -> Vec<BookOfferSnapshot> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let tokens = Decimal::new(rng.gen_range(1..1_000_000), 3);
            let xrp = Decimal::new(rng.gen_range(1..50_000_000), 6);
            token_for_xrp(tokens, xrp)
        })
        .collect()
}

pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

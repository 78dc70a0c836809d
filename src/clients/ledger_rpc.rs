// Ledger JSON-RPC Client
// Fetches order-book and AMM snapshots from a ledger node over HTTP

use crate::config::LedgerConfig;
use crate::error::{LiquidityError, LiquidityResult};
use crate::types::{AmmSnapshot, BookOfferSnapshot, BookSide, Issue};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Ledger error code returned by `amm_info` when no pool exists for the pair
const AMM_NOT_FOUND: &str = "actNotFound";

#[derive(Debug, Clone)]
pub struct LedgerRpcClient {
    client: reqwest::Client,
    rpc_url: String,
    book_limit: u32,
}

impl LedgerRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            book_limit: 100,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> LiquidityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            book_limit: config.book_limit,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn book_limit(&self) -> u32 {
        self.book_limit
    }

    /// Standing offers where the taker receives `side.gets` and pays `side.pays`.
    ///
    /// Entries that do not have the offer shape are logged and skipped.
    pub async fn book_offers(&self, side: &BookSide, limit: u32) -> LiquidityResult<Vec<BookOfferSnapshot>> {
        let result = self
            .call(
                "book_offers",
                json!({
                    "taker_gets": side.gets,
                    "taker_pays": side.pays,
                    "limit": limit,
                    "ledger_index": "validated",
                }),
            )
            .await?;

        if let Some(code) = ledger_error(&result) {
            return Err(LiquidityError::RpcResponse(format!("book_offers {}: {}", side, code)));
        }

        let entries = result
            .get("offers")
            .and_then(Value::as_array)
            .ok_or_else(|| LiquidityError::Parse("book_offers response has no offers array".to_string()))?;

        let mut offers = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match serde_json::from_value::<BookOfferSnapshot>(entry.clone()) {
                Ok(offer) => offers.push(offer),
                Err(e) => warn!("⚠️  Skipping unreadable offer #{} in {}: {}", index, side, e),
            }
        }

        debug!("📖 Fetched {} offers for {}", offers.len(), side);
        Ok(offers)
    }

    /// Pool state for the pair, or `None` when the ledger has no AMM for it
    pub async fn amm_info(&self, asset: &Issue, asset2: &Issue) -> LiquidityResult<Option<AmmSnapshot>> {
        let result = self
            .call(
                "amm_info",
                json!({
                    "asset": asset,
                    "asset2": asset2,
                    "ledger_index": "validated",
                }),
            )
            .await?;

        match ledger_error(&result) {
            Some(code) if code == AMM_NOT_FOUND => {
                debug!("No AMM pool for {}/{}", asset, asset2);
                return Ok(None);
            }
            Some(code) => {
                return Err(LiquidityError::RpcResponse(format!("amm_info {}/{}: {}", asset, asset2, code)));
            }
            None => {}
        }

        match result.get("amm") {
            Some(amm) => Ok(Some(serde_json::from_value(amm.clone())?)),
            None => Ok(None),
        }
    }

    async fn call(&self, method: &str, params: Value) -> LiquidityResult<Value> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&json!({ "method": method, "params": [params] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LiquidityError::Network(format!(
                "{} returned HTTP {}",
                method,
                response.status().as_u16()
            )));
        }

        let mut body: Value = response.json().await?;
        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(LiquidityError::Parse(format!("{} response has no result field", method))),
        }
    }
}

fn ledger_error(result: &Value) -> Option<String> {
    if result.get("status").and_then(Value::as_str) != Some("error") {
        return None;
    }
    Some(
        result
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

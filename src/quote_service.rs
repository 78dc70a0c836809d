//! Quote service: fetch snapshots, run the engine, publish the latest quote
//!
//! Order-book and AMM snapshots are fetched concurrently. A missing or failing
//! AMM lookup never fails the quote; it only means no synthetic offer.
//!
//! Scheduled quotes are debounced and tagged with a monotonically increasing
//! request id. A request that is superseded while waiting never fetches, and a
//! request whose fetch was already in flight when a newer one arrived has its
//! result dropped, so subscribers only ever see the newest request's quote.

use crate::clients::LedgerRpcClient;
use crate::config::Config;
use crate::error::LiquidityResult;
use crate::simulation::{LiquidityEngine, MarketQuote};
use crate::types::{AmmSnapshot, BookOfferSnapshot, BookSide, Issue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Where order-book and AMM snapshots come from
pub trait LiquiditySource: Send + Sync + 'static {
    fn fetch_book(
        &self,
        side: &BookSide,
    ) -> impl Future<Output = LiquidityResult<Vec<BookOfferSnapshot>>> + Send;

    /// `Ok(None)` when no pool exists for the pair
    fn fetch_amm(
        &self,
        asset: &Issue,
        asset2: &Issue,
    ) -> impl Future<Output = LiquidityResult<Option<AmmSnapshot>>> + Send;
}

impl LiquiditySource for LedgerRpcClient {
    async fn fetch_book(&self, side: &BookSide) -> LiquidityResult<Vec<BookOfferSnapshot>> {
        self.book_offers(side, self.book_limit()).await
    }

    async fn fetch_amm(&self, asset: &Issue, asset2: &Issue) -> LiquidityResult<Option<AmmSnapshot>> {
        self.amm_info(asset, asset2).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub side: BookSide,
    /// Amount of `side.pays` to spend
    pub trade_size: Decimal,
}

#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    pub request_id: u64,
    pub request: QuoteRequest,
    pub quote: MarketQuote,
    pub computed_at: DateTime<Utc>,
}

pub struct QuoteService<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    engine: LiquidityEngine,
    debounce: Duration,
    sequence: AtomicU64,
    updates: watch::Sender<Option<QuoteUpdate>>,
}

impl QuoteService<LedgerRpcClient> {
    /// Service backed by the configured ledger node
    pub fn from_config(config: &Config) -> LiquidityResult<Self> {
        let client = LedgerRpcClient::from_config(&config.ledger)?;
        Ok(Self::new(
            client,
            LiquidityEngine::new(config.engine.clone()),
            config.quote.debounce(),
        ))
    }
}

impl<S: LiquiditySource> QuoteService<S> {
    pub fn new(source: S, engine: LiquidityEngine, debounce: Duration) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                source,
                engine,
                debounce,
                sequence: AtomicU64::new(0),
                updates,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<QuoteUpdate>> {
        self.inner.updates.subscribe()
    }

    /// Id of the most recently scheduled request (0 before the first)
    pub fn latest_request_id(&self) -> u64 {
        self.inner.sequence.load(Ordering::SeqCst)
    }

    /// Fetch and quote immediately, bypassing debounce and sequencing
    pub async fn quote_now(&self, request: &QuoteRequest) -> LiquidityResult<MarketQuote> {
        self.inner.compute(request).await
    }

    /// Schedule a debounced quote and return its request id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, request: QuoteRequest) -> u64 {
        let request_id = self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.run_scheduled(request_id, request).await;
        });
        request_id
    }
}

impl<S: LiquiditySource> Inner<S> {
    fn is_latest(&self, request_id: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == request_id
    }

    async fn compute(&self, request: &QuoteRequest) -> LiquidityResult<MarketQuote> {
        let inverse = request.side.inverse();
        let (forward, inverse_offers, amm) = tokio::join!(
            self.source.fetch_book(&request.side),
            self.source.fetch_book(&inverse),
            self.source.fetch_amm(&request.side.gets, &request.side.pays),
        );

        let forward = forward?;
        let inverse_offers = inverse_offers?;
        let amm = amm.unwrap_or_else(|e| {
            warn!("AMM lookup for {} failed, quoting without pool: {}", request.side, e);
            None
        });

        Ok(self.engine.quote(
            &request.side,
            request.trade_size,
            &forward,
            &inverse_offers,
            amm.as_ref(),
        ))
    }

    async fn run_scheduled(&self, request_id: u64, request: QuoteRequest) {
        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(request_id) {
            debug!("Request #{} superseded before fetch", request_id);
            return;
        }

        match self.compute(&request).await {
            Ok(quote) => {
                if !self.publish(request_id, request, quote) {
                    debug!("Dropping stale result for request #{}", request_id);
                }
            }
            Err(e) => warn!("Quote request #{} failed ({}): {}", request_id, e.category(), e),
        }
    }

    /// Publish only if still the newest request and newer than what is shown
    fn publish(&self, request_id: u64, request: QuoteRequest, quote: MarketQuote) -> bool {
        let update = QuoteUpdate {
            request_id,
            request,
            quote,
            computed_at: Utc::now(),
        };

        self.updates.send_if_modified(|current| {
            let newer = current.as_ref().map_or(true, |shown| shown.request_id < request_id);
            if !newer || !self.is_latest(request_id) {
                return false;
            }
            *current = Some(update);
            true
        })
    }
}

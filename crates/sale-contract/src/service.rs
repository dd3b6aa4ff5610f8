//! # Sale Service
//!
//! Sequencing layer in front of [`TokenSale`].
//!
//! Concurrent submissions are serialized on a `tokio::sync::Mutex` in
//! lock-acquisition order, so each call observes the effects of every call
//! that acquired the lock before it. Events of successful calls are published
//! on a broadcast channel after the lock is released.
//!
//! Each submission runs in a span tagged with a correlation id.

use crate::contract::TokenSale;
use crate::domain::value_objects::U256;
use crate::errors::SaleError;
use crate::events::{CallOutcome, SaleEvent, SaleTransaction};
use crate::ports::inbound::TokenSaleApi;
use crate::ports::outbound::{AssetLedger, CurrencyBank};

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Sale service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
    /// Publish Prometheus metrics for every call.
    pub record_metrics: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            event_capacity: 1024,
            record_metrics: true,
        }
    }
}

/// Statistics for the sale service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Calls submitted.
    pub calls_submitted: u64,
    /// Calls that succeeded.
    pub calls_succeeded: u64,
    /// Calls that were rejected.
    pub calls_rejected: u64,
    /// Accepted purchases.
    pub purchases: u64,
    /// Average call time in microseconds.
    pub avg_call_time_us: u64,
}

/// Serialized access to a [`TokenSale`].
pub struct SaleService<L, B> {
    config: ServiceConfig,
    sale: Arc<Mutex<TokenSale<L, B>>>,
    events: broadcast::Sender<SaleEvent>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<L, B> Clone for SaleService<L, B> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            sale: Arc::clone(&self.sale),
            events: self.events.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<L, B> SaleService<L, B>
where
    L: AssetLedger + Clone + Send + 'static,
    B: CurrencyBank + Clone + Send + 'static,
{
    /// Wrap a deployed sale.
    pub fn new(sale: TokenSale<L, B>, config: ServiceConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        if config.record_metrics {
            if let Err(e) = sale_telemetry::register_metrics() {
                warn!(error = %e, "sale metrics unavailable");
            }
        }
        Self {
            config,
            sale: Arc::new(Mutex::new(sale)),
            events,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Subscribe to events of calls accepted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SaleEvent> {
        self.events.subscribe()
    }

    /// Current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Read the sale under the lock.
    pub async fn query<R>(&self, f: impl FnOnce(&TokenSale<L, B>) -> R) -> R {
        let sale = self.sale.lock().await;
        f(&sale)
    }

    /// Submit a call under a fresh correlation id.
    pub async fn submit(&self, tx: SaleTransaction) -> Result<CallOutcome, SaleError> {
        self.submit_with_id(Uuid::new_v4(), tx).await
    }

    /// Submit a call under `correlation_id`.
    #[instrument(
        skip(self, tx),
        fields(
            correlation_id = %correlation_id,
            call = tx.call.name(),
            sender = %tx.ctx.sender,
        )
    )]
    pub async fn submit_with_id(
        &self,
        correlation_id: Uuid,
        tx: SaleTransaction,
    ) -> Result<CallOutcome, SaleError> {
        let start = Instant::now();

        let (result, emitted, totals) = {
            let mut sale = self.sale.lock().await;
            let seen = sale.events().len();
            let result = sale.apply(&tx);
            let emitted = sale.events()[seen..].to_vec();
            let totals = (sale.currency_raised(), sale.asset_sold());
            (result, emitted, totals)
        };

        let elapsed = start.elapsed();
        let call = tx.call.name();

        {
            let mut stats = self.stats.write().await;
            stats.calls_submitted += 1;
            match &result {
                Ok(outcome) => {
                    stats.calls_succeeded += 1;
                    if matches!(outcome, CallOutcome::Purchased(_)) {
                        stats.purchases += 1;
                    }
                }
                Err(_) => stats.calls_rejected += 1,
            }
            let total = stats.calls_submitted;
            let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
            stats.avg_call_time_us =
                (stats.avg_call_time_us * (total - 1)).saturating_add(elapsed_us) / total;
        }

        if self.config.record_metrics {
            sale_telemetry::record_call(call, elapsed.as_secs_f64());
            match &result {
                Ok(outcome) => {
                    match outcome {
                        CallOutcome::Purchased(_) => sale_telemetry::record_purchase(),
                        CallOutcome::Finalized { .. } => sale_telemetry::record_finalized(),
                        _ => {}
                    }
                    sale_telemetry::record_totals(gauge_value(totals.0), gauge_value(totals.1));
                }
                Err(err) => sale_telemetry::record_rejection(err.reason()),
            }
        }

        match &result {
            Ok(_) => {
                info!(events = emitted.len(), "call accepted");
                for event in emitted {
                    // No subscribers is not an error.
                    let _ = self.events.send(event);
                }
            }
            Err(err) => debug!(reason = err.reason(), "call rejected"),
        }

        result
    }
}

/// Lossy conversion for gauges.
fn gauge_value(amount: U256) -> f64 {
    if amount.bits() <= 128 {
        amount.low_u128() as f64
    } else {
        f64::MAX
    }
}

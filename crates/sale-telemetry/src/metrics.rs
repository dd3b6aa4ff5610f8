//! Prometheus metrics for the token sale.
//!
//! All metrics follow the naming convention: `sale_<metric>_<unit>`
//!
//! Amount gauges are reported in the smallest denomination and lose
//! precision above 2^53.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Accepted purchases
    pub static ref PURCHASES: Counter = Counter::new(
        "sale_purchases_total",
        "Total number of accepted purchases"
    ).expect("metric creation failed");

    /// Rejected calls by reason
    pub static ref REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("sale_rejections_total", "Total rejected calls"),
        &["reason"]
    ).expect("metric creation failed");

    /// Currency accounted so far
    pub static ref CURRENCY_RAISED: Gauge = Gauge::new(
        "sale_currency_raised",
        "Currency raised (smallest denomination)"
    ).expect("metric creation failed");

    /// Asset allocated so far
    pub static ref ASSET_SOLD: Gauge = Gauge::new(
        "sale_asset_sold",
        "Asset sold (smallest denomination)"
    ).expect("metric creation failed");

    /// 1 once settlement ran
    pub static ref SALE_FINALIZED: Gauge = Gauge::new(
        "sale_finalized",
        "Whether the sale has been finalized"
    ).expect("metric creation failed");

    /// Call latency through the service
    pub static ref CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sale_call_duration_seconds",
            "Time spent executing a sale call"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid buckets")),
        &["call"]
    ).expect("metric creation failed");
}

/// Register all sale metrics with the global registry.
///
/// Calling it again is a no-op.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PURCHASES.clone()),
        Box::new(REJECTIONS.clone()),
        Box::new(CURRENCY_RAISED.clone()),
        Box::new(ASSET_SOLD.clone()),
        Box::new(SALE_FINALIZED.clone()),
        Box::new(CALL_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count an accepted purchase.
pub fn record_purchase() {
    PURCHASES.inc();
}

/// Count a rejected call under its reason label.
pub fn record_rejection(reason: &str) {
    REJECTIONS.with_label_values(&[reason]).inc();
}

/// Publish the running totals.
pub fn record_totals(currency_raised: f64, asset_sold: f64) {
    CURRENCY_RAISED.set(currency_raised);
    ASSET_SOLD.set(asset_sold);
}

/// Mark the sale as finalized.
pub fn record_finalized() {
    SALE_FINALIZED.set(1.0);
}

/// Observe how long `call` took.
pub fn record_call(call: &str, seconds: f64) {
    CALL_DURATION.with_label_values(&[call]).observe(seconds);
}

//! # Sale Telemetry
//!
//! Structured logging and Prometheus metrics for the token sale.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sale_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SALE_SERVICE_NAME` | `token-sale` | Service name attached to logs |
//! | `SALE_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SALE_JSON_LOGS` | `false` (`true` in containers) | JSON log output |
//! | `SALE_METRICS` | `true` | Register Prometheus collectors |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_call, record_finalized, record_purchase, record_rejection,
    record_totals, register_metrics, ASSET_SOLD, CALL_DURATION, CURRENCY_RAISED, PURCHASES,
    REGISTRY, REJECTIONS, SALE_FINALIZED,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A collector could not be registered or encoded.
    #[error("failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Register metrics (when enabled) and install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if config.metrics_enabled {
        register_metrics()?;
    }
    init_logging(config)?;
    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "telemetry initialized"
    );
    Ok(())
}

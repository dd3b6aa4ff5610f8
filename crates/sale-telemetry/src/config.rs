//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to logs
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to use ANSI colors in the pretty format
    pub ansi: bool,

    /// Whether to register the Prometheus collectors
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "token-sale".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            ansi: true,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SALE_SERVICE_NAME`: Service name (default: token-sale)
    /// - `SALE_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `SALE_JSON_LOGS`: JSON logs (default: false, true in containers)
    /// - `SALE_ANSI`: ANSI colors (default: true)
    /// - `SALE_METRICS`: Register metrics (default: true)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();
        let defaults = Self::default();

        Self {
            service_name: env::var("SALE_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("SALE_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("SALE_JSON_LOGS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(is_container),

            ansi: env::var("SALE_ANSI")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.ansi),

            metrics_enabled: env::var("SALE_METRICS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }
}

/// `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, case-insensitive.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

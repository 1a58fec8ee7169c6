//! Cart engine configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Capacity of the request channel into the orchestrator
    pub request_buffer: usize,

    /// Capacity of the outcome broadcast channel
    pub outcome_buffer: usize,

    /// Give up on a shipping lookup after this many milliseconds (unset: wait forever)
    pub shipping_timeout_ms: Option<u64>,

    /// Quote used by the flat-rate shipping provider
    pub flat_shipping: Decimal,

    /// Simulated latency of the flat-rate shipping provider in milliseconds
    pub shipping_latency_ms: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            request_buffer: 32,
            outcome_buffer: 64,
            shipping_timeout_ms: None,
            flat_shipping: Decimal::new(500, 2),
            shipping_latency_ms: 0,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = CartConfig {
            request_buffer: parse_or(&lookup, "CART_REQUEST_BUFFER", defaults.request_buffer)?,
            outcome_buffer: parse_or(&lookup, "CART_OUTCOME_BUFFER", defaults.outcome_buffer)?,
            shipping_timeout_ms: match lookup("CART_SHIPPING_TIMEOUT_MS") {
                Some(raw) => Some(parse("CART_SHIPPING_TIMEOUT_MS", &raw)?),
                None => defaults.shipping_timeout_ms,
            },
            flat_shipping: parse_or(&lookup, "CART_FLAT_SHIPPING", defaults.flat_shipping)?,
            shipping_latency_ms: parse_or(
                &lookup,
                "CART_SHIPPING_LATENCY_MS",
                defaults.shipping_latency_ms,
            )?,
        };

        if config.request_buffer == 0 {
            return Err(ConfigError::ZeroBuffer("CART_REQUEST_BUFFER".to_string()));
        }
        if config.outcome_buffer == 0 {
            return Err(ConfigError::ZeroBuffer("CART_OUTCOME_BUFFER".to_string()));
        }
        if config.flat_shipping.is_sign_negative() {
            return Err(ConfigError::InvalidValue("CART_FLAT_SHIPPING".to_string()));
        }

        Ok(config)
    }

    pub fn shipping_timeout(&self) -> Option<Duration> {
        self.shipping_timeout_ms.map(Duration::from_millis)
    }

    pub fn shipping_latency(&self) -> Duration {
        Duration::from_millis(self.shipping_latency_ms)
    }
}

fn parse<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => parse(name, &raw),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Buffer size must be non-zero: {0}")]
    ZeroBuffer(String),
}

use super::{ShippingError, ShippingProvider};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::debug;

/// Provider that always quotes the same amount, optionally after a delay.
///
/// Stands in for the remote shipping service in the demo binary and in
/// end-to-end tests.
#[derive(Debug, Clone)]
pub struct FlatRateShipping {
    rate: Decimal,
    latency: Duration,
}

impl FlatRateShipping {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            latency: Duration::ZERO,
        }
    }

    /// Simulates a slow network round-trip before each quote.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

#[async_trait]
impl ShippingProvider for FlatRateShipping {
    async fn fetch_shipping(&self) -> Result<Decimal, ShippingError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.rate.is_sign_negative() {
            return Err(ShippingError::InvalidCost(self.rate.to_string()));
        }
        debug!(rate = %self.rate, "Flat rate quoted");
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flat_rate_quotes_configured_amount() {
        let provider = FlatRateShipping::new(Decimal::new(599, 2));
        assert_eq!(provider.fetch_shipping().await, Ok(provider.rate()));
        assert_eq!(provider.rate(), Decimal::new(599, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flat_rate_waits_for_latency() {
        let provider = FlatRateShipping::new(Decimal::ONE).with_latency(Duration::from_millis(250));
        let started = tokio::time::Instant::now();

        provider.fetch_shipping().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_negative_rate_is_rejected() {
        let provider = FlatRateShipping::new(Decimal::new(-1, 0));
        assert!(matches!(
            provider.fetch_shipping().await,
            Err(ShippingError::InvalidCost(_))
        ));
    }
}

//! Currency rate abstractions

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::error::RateError;

/// A currency pair to look up. Only the EUR/USD pair is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRateQuery {
    pub base: &'static str,
    pub target: &'static str,
}

impl ExchangeRateQuery {
    pub const EUR_USD: ExchangeRateQuery = ExchangeRateQuery {
        base: "EUR",
        target: "USD",
    };

    /// Human readable pair name used in logs and error messages, e.g. `EUR/USD`.
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.target)
    }
}

impl Default for ExchangeRateQuery {
    fn default() -> Self {
        Self::EUR_USD
    }
}

/// Reshaped rate returned to API callers.
///
/// `timestamp` is the date the upstream publishes for the rate, serialized
/// as an ISO 8601 date (`2025-01-15`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateResult {
    pub base: String,
    pub target: String,
    pub rate: f64,
    pub timestamp: NaiveDate,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, query: &ExchangeRateQuery) -> Result<ExchangeRateResult, RateError>;
}

/// Fetches the current EUR/USD rate from `provider`.
pub async fn fetch_eur_usd_rate(
    provider: &dyn CurrencyRateProvider,
) -> Result<ExchangeRateResult, RateError> {
    provider.get_rate(&ExchangeRateQuery::EUR_USD).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider;

    #[async_trait]
    impl CurrencyRateProvider for FixedProvider {
        async fn get_rate(
            &self,
            query: &ExchangeRateQuery,
        ) -> Result<ExchangeRateResult, RateError> {
            Ok(ExchangeRateResult {
                base: query.base.to_string(),
                target: query.target.to_string(),
                rate: 1.08,
                timestamp: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            })
        }
    }

    #[test]
    fn test_default_query_is_eur_usd() {
        let query = ExchangeRateQuery::default();
        assert_eq!(query.base, "EUR");
        assert_eq!(query.target, "USD");
        assert_eq!(query.pair(), "EUR/USD");
    }

    #[tokio::test]
    async fn test_fetch_eur_usd_rate_asks_for_eur_usd() {
        let result = fetch_eur_usd_rate(&FixedProvider).await.unwrap();
        assert_eq!(result.base, "EUR");
        assert_eq!(result.target, "USD");
        assert_eq!(result.rate, 1.08);
    }

    #[test]
    fn test_result_serializes_to_api_shape() {
        let result = ExchangeRateResult {
            base: "EUR".to_string(),
            target: "USD".to_string(),
            rate: 1.08,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "base": "EUR",
                "target": "USD",
                "rate": 1.08,
                "timestamp": "2025-01-15"
            })
        );
    }
}

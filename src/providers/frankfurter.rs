use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::currency::{CurrencyRateProvider, ExchangeRateQuery, ExchangeRateResult};
use crate::core::error::RateError;

/// Bound on a whole upstream exchange: connect, headers and body.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

const LATEST_PATH: &str = "/v1/latest";

// FrankfurterProvider implementation for CurrencyRateProvider
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn latest_url(&self, query: &ExchangeRateQuery) -> Result<Url, RateError> {
        Url::parse_with_params(
            &format!("{}{}", self.base_url, LATEST_PATH),
            &[("base", query.base), ("symbols", query.target)],
        )
        .map_err(|e| transport(&query.pair(), format!("invalid upstream URL: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    rates: HashMap<String, f64>,
    date: NaiveDate,
}

fn transport(pair: &str, message: impl Into<String>) -> RateError {
    RateError::Transport {
        pair: pair.to_string(),
        message: message.into(),
    }
}

fn malformed(pair: &str, message: impl Into<String>) -> RateError {
    RateError::MalformedResponse {
        pair: pair.to_string(),
        message: message.into(),
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

#[async_trait]
impl CurrencyRateProvider for FrankfurterProvider {
    #[instrument(
        name = "FrankfurterRateFetch",
        skip(self),
        fields(pair = %query.pair())
    )]
    async fn get_rate(&self, query: &ExchangeRateQuery) -> Result<ExchangeRateResult, RateError> {
        let pair = query.pair();

        let url = self.latest_url(query)?;
        debug!("Requesting exchange rate from {}", url);

        // One client per lookup; it and its connection are released on every return path.
        let client = reqwest::Client::builder()
            .user_agent("fxproxy/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| transport(&pair, format!("failed to build HTTP client: {e}")))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&pair, describe(&e)))?;

        debug!(status = %response.status(), "Received Frankfurter response");

        if !response.status().is_success() {
            warn!(status = %response.status(), "Upstream rejected exchange rate request");
            return Err(RateError::Upstream {
                status: response.status().as_u16(),
                pair,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport(&pair, describe(&e)))?;

        let data: FrankfurterResponse = serde_json::from_str(&text)
            .map_err(|e| malformed(&pair, format!("failed to parse JSON response: {e}")))?;

        let rate = data
            .rates
            .get(query.target)
            .copied()
            .ok_or_else(|| malformed(&pair, format!("missing rate for {}", query.target)))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(malformed(
                &pair,
                format!("rate for {} must be positive, got {rate}", query.target),
            ));
        }

        Ok(ExchangeRateResult {
            base: query.base.to_string(),
            target: query.target.to_string(),
            rate,
            timestamp: data.date,
        })
    }
}

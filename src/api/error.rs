//! HTTP mapping for rate lookup failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::core::error::RateError;

pub const UPSTREAM_FAILURE_DETAIL: &str = "Failed to fetch exchange rate";
pub const TRANSPORT_FAILURE_DETAIL: &str = "Exchange rate service unavailable";
pub const MALFORMED_RESPONSE_DETAIL: &str = "Invalid exchange rate response";

impl RateError {
    /// Upstream rejections are a bad gateway; everything else is our fault.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RateError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            RateError::Transport { .. } | RateError::MalformedResponse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            RateError::Upstream { .. } => UPSTREAM_FAILURE_DETAIL,
            RateError::Transport { .. } => TRANSPORT_FAILURE_DETAIL,
            RateError::MalformedResponse { .. } => MALFORMED_RESPONSE_DETAIL,
        }
    }
}

impl IntoResponse for RateError {
    fn into_response(self) -> Response {
        error!(error = %self, "Exchange rate request failed");
        (self.status_code(), Json(json!({"detail": self.detail()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> String {
        "EUR/USD".to_string()
    }

    #[test]
    fn test_upstream_error_maps_to_bad_gateway() {
        let err = RateError::Upstream {
            status: 503,
            pair: pair(),
        };
        assert_eq!(err.detail(), "Failed to fetch exchange rate");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_transport_and_malformed_map_to_500() {
        let transport = RateError::Transport {
            pair: pair(),
            message: "request timed out".to_string(),
        };
        assert_eq!(
            transport.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let malformed = RateError::MalformedResponse {
            pair: pair(),
            message: "missing rate for USD".to_string(),
        };
        assert_eq!(
            malformed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_does_not_leak_internal_message() {
        let err = RateError::Transport {
            pair: pair(),
            message: "connection failed: 10.0.0.7:443".to_string(),
        };
        assert!(!err.detail().contains("10.0.0.7"));
    }
}

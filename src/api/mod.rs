//! Axum router and handlers for the public HTTP API.

pub mod error;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::core::{
    CurrencyRateProvider, ExchangeRateResult, RateError, config::CorsConfig, fetch_eur_usd_rate,
};

pub const HELLO_MESSAGE: &str = "Hello from fxproxy";

type Provider = Arc<dyn CurrencyRateProvider>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given rate provider.
pub fn create_router(provider: Provider, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/hello", get(hello))
        .route("/api/eur-usd", get(eur_usd))
        .with_state(provider)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Cross-origin policy for the configured allow-list.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answered with `*`.
///
/// # Errors
/// Fails if an origin is not a valid header value or is the `*` wildcard.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let mut origins = Vec::with_capacity(config.allowed_origins.len());
    for origin in &config.allowed_origins {
        if origin.trim() == "*" {
            bail!("Wildcard origin cannot be combined with credentials");
        }
        let value = HeaderValue::from_str(origin.trim())
            .with_context(|| format!("Invalid CORS origin: {origin:?}"))?;
        origins.push(value);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` and `GET /api/health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// `GET /api/hello`
pub async fn hello() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": HELLO_MESSAGE})))
}

/// `GET /api/eur-usd`: current EUR/USD rate from the upstream.
///
/// # Errors
/// See [`RateError::status_code`] for how failures surface.
pub async fn eur_usd(
    State(provider): State<Provider>,
) -> Result<Json<ExchangeRateResult>, RateError> {
    let result = fetch_eur_usd_rate(provider.as_ref()).await?;
    Ok(Json(result))
}

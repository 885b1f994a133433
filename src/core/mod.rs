//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use currency::{CurrencyRateProvider, ExchangeRateQuery, ExchangeRateResult, fetch_eur_usd_rate};
pub use error::RateError;

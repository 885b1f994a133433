//! Failures of an exchange rate lookup.

/// Every variant is terminal for the current request; nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RateError {
    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status} for {pair}")]
    Upstream { status: u16, pair: String },

    /// No response was obtained: connect failure, timeout, or a request that
    /// could not be built.
    #[error("transport error for {pair}: {message}")]
    Transport { pair: String, message: String },

    /// The upstream answered successfully but the body does not carry the
    /// expected fields.
    #[error("malformed response for {pair}: {message}")]
    MalformedResponse { pair: String, message: String },
}

use thiserror::Error;

/// Main error type for livechart
///
/// None of these are fatal to a host: the engine absorbs provider failures
/// by backing off, so the worst observable outcome is a chart that
/// temporarily stops updating.
#[derive(Error, Debug)]
pub enum LiveChartError {
    /// Provider refused the request because of rate limiting
    #[error("rate limited by provider")]
    RateLimited,

    /// Transport-level failure (connect, timeout, non-success status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider responded with something that could not be decoded
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Client construction or configuration problem
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for livechart operations
pub type Result<T> = std::result::Result<T, LiveChartError>;

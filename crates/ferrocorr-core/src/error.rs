use thiserror::Error;

/// Validation and contract errors exposed by `ferrocorr-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or '^': '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("invalid lookback '{value}', expected one of 1w, 1m, 3m, 6m, 1y, 5y, max")]
    InvalidLookback { value: String },

    #[error("timestamp must be RFC3339 or YYYY-MM-DD: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("invalid parallelism '{value}', expected one of auto, sequential, parallel")]
    InvalidParallelism { value: String },
    #[error("parallel_threshold must be at least 2")]
    InvalidParallelThreshold,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// Top-level error type for core operations.
///
/// The engine itself never fails; these only surface at the decoding and
/// envelope edges.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("price document must be a JSON object keyed by ticker, found {found}")]
    InvalidDocument { found: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

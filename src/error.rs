use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// InvalidArgument
// ---------------------------------------------------------------------------

/// A caller passed something the operation cannot accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("required handler not passed")]
    MissingHandler,

    #[error("count must be an integer, received {0}")]
    NotAnInteger(Value),

    #[error("count must be a non-negative integer, received {0}")]
    NegativeCount(i64),

    #[error("max listeners must be a positive integer")]
    ZeroLimit,
}

// ---------------------------------------------------------------------------
// EmitterError — top-level rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmitterError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("can't overwrite max listeners value (already set to {current})")]
    Configuration { current: usize },

    #[error("can't add more listeners (limit is {limit})")]
    CapacityExceeded { limit: usize },

    #[error("max listeners {limit} is below the {registered} listeners already registered")]
    LimitBelowCount { limit: usize, registered: usize },
}

/// Convenience alias — the default error type is `EmitterError`.
pub type Result<T, E = EmitterError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Cache operation error types
//!
//! One concrete error enum covers orchestrator preconditions, authoritative
//! misses, and the open channel layers use to report their own failures.

/// Cache operation error types
///
/// Validation variants (`MissingKey`, `MissingValue`) are produced by the
/// orchestrator before any layer runs; `KeyNotFound` and `StorageError` are
/// set by layers inside the context and propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOperationError {
    /// Context key is empty; no layer was invoked
    MissingKey,
    /// Write attempted without a value; no layer was invoked
    MissingValue,
    /// An authoritative layer holds no entry for the key
    KeyNotFound,
    /// Layer-defined failure (storage unavailable, backend error, ...)
    StorageError(String),
}

impl std::fmt::Display for CacheOperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheOperationError::MissingKey => write!(f, "Context key is missing or empty"),
            CacheOperationError::MissingValue => write!(f, "Write requires a value"),
            CacheOperationError::KeyNotFound => write!(f, "Key not found in any layer"),
            CacheOperationError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for CacheOperationError {}

impl CacheOperationError {
    /// Create layer storage error
    #[inline(always)]
    pub fn storage_error(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Whether this error was raised before any layer ran
    #[inline(always)]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingKey | Self::MissingValue)
    }
}

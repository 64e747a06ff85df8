//! Error types for alarm table mutations.

use crate::codec::CodecError;

/// Why an alarm table operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    /// Adding the pattern would overflow the reserved region.
    #[error("adding alarm needs {required} bytes but only {max_length} are reserved")]
    CapacityExceeded { required: usize, max_length: usize },

    /// The exact pattern is already stored.
    #[error("alarm already present: {0}")]
    DuplicateEntry(String),

    /// The pattern is empty or contains a reserved framing byte.
    #[error("invalid alarm pattern: {0:?}")]
    InvalidPattern(String),

    /// No stored alarm equals the pattern.
    #[error("alarm not found: {0}")]
    NotFound(String),

    /// The table holds no alarms.
    #[error("alarm table is empty")]
    Empty,

    /// The store cannot hold the requested region.
    #[error("Config error: {0}")]
    Config(String),

    /// Loading or saving the persisted table failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result alias for manager operations.
pub type Result<T> = std::result::Result<T, ManagerError>;

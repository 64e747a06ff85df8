//! Error types for the alarm table codec.

/// Errors raised while loading or saving the persisted alarm table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// No closing table delimiter within the region; the store is corrupted
    /// or was never finalized.
    #[error("alarm table unterminated within {max_length} bytes")]
    Unterminated { max_length: usize },

    /// A record starting at `offset` is not valid UTF-8.
    #[error("alarm record at offset {offset} is not valid UTF-8")]
    InvalidRecord { offset: usize },

    /// The set does not fit in the region.
    #[error("alarm table needs {required} bytes but only {max_length} are reserved")]
    Overflow { required: usize, max_length: usize },
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

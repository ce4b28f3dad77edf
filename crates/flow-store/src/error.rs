use thiserror::Error;

/// Errors that can occur when writing to a flow store.
///
/// Reads never fail: a missing or malformed record degrades to an empty
/// [`crate::FlowState`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing persistence slot rejected the write.
    #[error("Persistence backend error: {0}")]
    Backend(String),
}

/// Result type for flow store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Error types for store operations.

use keying_core::KeyError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a keyed store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record could not be keyed.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// No record is stored under the identifier.
    #[error("entity not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// A record reached the store without an identifier.
    #[error("record of type {record_type} has no key")]
    MissingKey {
        /// Name of the record type.
        record_type: String,
    },
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a missing key error.
    pub fn missing_key(record_type: impl Into<String>) -> Self {
        Self::MissingKey {
            record_type: record_type.into(),
        }
    }
}

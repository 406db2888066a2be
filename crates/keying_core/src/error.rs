//! Error types for key strategy compilation and key computation.

use crate::segment::SegmentKind;
use thiserror::Error;

/// Result type for keying operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors that can occur while compiling or applying a key strategy.
///
/// Every variant is a configuration fault. None of them are transient, so
/// retrying the same call with the same record type fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The number of `PROPERTY` segments differs from the number of
    /// declared property names.
    #[error(
        "{record_type}: strategy declares {segments} PROPERTY segment(s) but {properties} property name(s)"
    )]
    PropertyCountMismatch {
        /// Name of the record type.
        record_type: String,
        /// Number of `PROPERTY` segments seen so far.
        segments: usize,
        /// Number of declared property names.
        properties: usize,
    },

    /// The strategy consists of a single time segment.
    #[error("{record_type} cannot have a key value of only a time")]
    TimeOnlyStrategy {
        /// Name of the record type.
        record_type: String,
    },

    /// The strategy has no segments at all.
    #[error("{record_type} declares an empty key strategy")]
    EmptyStrategy {
        /// Name of the record type.
        record_type: String,
    },

    /// A segment kind name could not be recognised.
    #[error("unknown segment type {kind}")]
    UnknownSegment {
        /// The offending segment name.
        kind: String,
    },

    /// A `PROPERTY` segment refers to a field the record type does not expose.
    #[error("{record_type} has no readable property {property:?}")]
    UnknownProperty {
        /// Name of the record type.
        record_type: String,
        /// The property that could not be resolved.
        property: String,
    },

    /// `compute` was requested for a pipeline whose output is not reproducible.
    #[error("{record_type}: {kind} isn't a deterministic component")]
    NonDeterministic {
        /// Name of the record type.
        record_type: String,
        /// Kind of the first non-deterministic component.
        kind: SegmentKind,
    },

    /// A dynamic record was given input that does not match its type.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// Description of the problem.
        message: String,
    },
}

impl KeyError {
    /// Creates a property count mismatch error.
    pub fn property_count_mismatch(
        record_type: impl Into<String>,
        segments: usize,
        properties: usize,
    ) -> Self {
        Self::PropertyCountMismatch {
            record_type: record_type.into(),
            segments,
            properties,
        }
    }

    /// Creates a time-only strategy error.
    pub fn time_only(record_type: impl Into<String>) -> Self {
        Self::TimeOnlyStrategy {
            record_type: record_type.into(),
        }
    }

    /// Creates an empty strategy error.
    pub fn empty_strategy(record_type: impl Into<String>) -> Self {
        Self::EmptyStrategy {
            record_type: record_type.into(),
        }
    }

    /// Creates an unknown segment error.
    pub fn unknown_segment(kind: impl Into<String>) -> Self {
        Self::UnknownSegment { kind: kind.into() }
    }

    /// Creates an unknown property error.
    pub fn unknown_property(record_type: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            record_type: record_type.into(),
            property: property.into(),
        }
    }

    /// Creates a non-deterministic component error.
    pub fn non_deterministic(record_type: impl Into<String>, kind: SegmentKind) -> Self {
        Self::NonDeterministic {
            record_type: record_type.into(),
            kind,
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Returns true if the error was raised while compiling a strategy.
    #[must_use]
    pub fn is_strategy_error(&self) -> bool {
        matches!(
            self,
            Self::PropertyCountMismatch { .. }
                | Self::TimeOnlyStrategy { .. }
                | Self::EmptyStrategy { .. }
                | Self::UnknownSegment { .. }
                | Self::UnknownProperty { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = KeyError::unknown_segment("SNOWFLAKE");
        assert_eq!(err.to_string(), "unknown segment type SNOWFLAKE");

        let err = KeyError::non_deterministic("Order", SegmentKind::Uuid);
        assert!(err.to_string().contains("UUID"));
        assert!(err.to_string().contains("Order"));
    }

    #[test]
    fn strategy_errors_are_classified() {
        assert!(KeyError::time_only("Order").is_strategy_error());
        assert!(KeyError::unknown_property("Order", "id").is_strategy_error());
        assert!(!KeyError::non_deterministic("Order", SegmentKind::Uuid).is_strategy_error());
        assert!(!KeyError::invalid_record("bad").is_strategy_error());
    }
}

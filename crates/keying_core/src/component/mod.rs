//! Segment-producing components.
//!
//! A compiled pipeline is an ordered list of components. Each one appends a
//! single segment of the key for a given record.

mod property;
mod time;
mod uuid;

pub use property::PropertyComponent;
pub use time::{TimeComponent, TIME_WIDTH};
pub use self::uuid::UuidComponent;

use crate::segment::SegmentKind;

/// Whether a component reproduces its output for an unchanged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Determinism {
    /// Same record, same segment.
    Deterministic,
    /// A fresh value on every invocation.
    NonDeterministic,
}

/// Produces one segment of a key.
pub trait Component<T>: Send + Sync {
    /// The segment kind this component was compiled from.
    fn kind(&self) -> SegmentKind;

    /// Whether repeated calls on an unchanged record agree.
    fn determinism(&self) -> Determinism {
        Determinism::Deterministic
    }

    /// Appends this component's segment for `record` to `out`.
    fn render(&self, record: &T, out: &mut String);
}

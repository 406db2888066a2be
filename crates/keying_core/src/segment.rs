//! Segment descriptors and key strategies.

use crate::error::{KeyError, KeyResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of one segment of a composite key.
///
/// Serialized as its canonical name. Deserialization accepts the same
/// spellings as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum SegmentKind {
    /// The rendered value of a named record property.
    Property,
    /// A freshly generated random UUID.
    Uuid,
    /// The current instant, sorting oldest first.
    Time,
    /// The current instant, sorting newest first.
    InverseTime,
}

impl SegmentKind {
    /// All segment kinds, in declaration order.
    pub const ALL: [SegmentKind; 4] = [
        SegmentKind::Property,
        SegmentKind::Uuid,
        SegmentKind::Time,
        SegmentKind::InverseTime,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Property => "PROPERTY",
            SegmentKind::Uuid => "UUID",
            SegmentKind::Time => "TIME",
            SegmentKind::InverseTime => "INVERSE_TIME",
        }
    }

    /// Returns true for `TIME` and `INVERSE_TIME`.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, SegmentKind::Time | SegmentKind::InverseTime)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentKind {
    type Err = KeyError;

    /// Parses a segment name case-insensitively. `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        SegmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| KeyError::unknown_segment(s.trim()))
    }
}

impl TryFrom<String> for SegmentKind {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A record type's declared key layout.
///
/// `properties` are matched positionally against the `PROPERTY` entries of
/// `segments`: the first `PROPERTY` segment reads `properties[0]`, the second
/// reads `properties[1]`, and so on. A strategy is only checked when it is
/// compiled into a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Strategy {
    /// Ordered segment kinds.
    pub segments: Vec<SegmentKind>,
    /// Property names for the `PROPERTY` segments, in strategy order.
    #[serde(default)]
    pub properties: Vec<String>,
}

impl Strategy {
    /// Creates a strategy from segment kinds, with no property names.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = SegmentKind>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
            properties: Vec::new(),
        }
    }

    /// Sets the property names read by the `PROPERTY` segments.
    #[must_use]
    pub fn with_properties<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.properties = names.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a comma separated list of segment names, e.g. `"INVERSE_TIME,PROPERTY"`.
    pub fn parse(list: &str) -> KeyResult<Self> {
        let segments = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SegmentKind::from_str)
            .collect::<KeyResult<Vec<_>>>()?;
        Ok(Self::new(segments))
    }

    /// Returns the number of `PROPERTY` segments.
    #[must_use]
    pub fn property_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|kind| **kind == SegmentKind::Property)
            .count()
    }

    /// Returns true if the strategy contains a `UUID` segment.
    #[must_use]
    pub fn has_uuid(&self) -> bool {
        self.segments.contains(&SegmentKind::Uuid)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.properties.iter();
        for (i, kind) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if *kind != SegmentKind::Property {
                write!(f, "{kind}")?;
                continue;
            }
            match names.next() {
                Some(name) => write!(f, "PROPERTY({name})")?,
                None => f.write_str("PROPERTY(?)")?,
            }
        }
        Ok(())
    }
}

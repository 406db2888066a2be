//! Random UUID segments.

use crate::component::{Component, Determinism};
use crate::config::UuidFormat;
use crate::segment::SegmentKind;
use uuid::Uuid;

/// Renders a fresh random (v4) UUID on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidComponent {
    format: UuidFormat,
}

impl UuidComponent {
    /// Creates a UUID component with the given rendering.
    #[must_use]
    pub const fn new(format: UuidFormat) -> Self {
        Self { format }
    }
}

impl<T> Component<T> for UuidComponent {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Uuid
    }

    fn determinism(&self) -> Determinism {
        Determinism::NonDeterministic
    }

    fn render(&self, _record: &T, out: &mut String) {
        let uuid = Uuid::new_v4();
        let mut buf = Uuid::encode_buffer();
        let text = match self.format {
            UuidFormat::Hyphenated => uuid.hyphenated().encode_lower(&mut buf),
            UuidFormat::Simple => uuid.simple().encode_lower(&mut buf),
        };
        out.push_str(text);
    }
}

//! Time segments.
//!
//! The instant is rendered as a fixed-width, zero-padded decimal so that
//! lexical order matches numeric order. Inverted segments render
//! `u64::MAX - t`: a later instant yields a smaller string, which lists the
//! newest records first under a plain ascending key scan.

use crate::clock::Clock;
use crate::component::Component;
use crate::config::TimePrecision;
use crate::segment::SegmentKind;
use std::fmt::Write;
use std::sync::Arc;

/// Number of digits in a rendered time segment (`u64::MAX` has 20).
pub const TIME_WIDTH: usize = 20;

/// Renders the current instant, ascending or inverted.
#[derive(Debug, Clone)]
pub struct TimeComponent {
    inverted: bool,
    precision: TimePrecision,
    clock: Arc<dyn Clock>,
}

impl TimeComponent {
    /// Creates a time component reading `clock`.
    pub fn new(inverted: bool, precision: TimePrecision, clock: Arc<dyn Clock>) -> Self {
        Self {
            inverted,
            precision,
            clock,
        }
    }

    /// Returns true if later instants sort first.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Encodes an instant, already truncated to this component's precision.
    #[must_use]
    pub fn encode(&self, instant: u64) -> String {
        let mut out = String::with_capacity(TIME_WIDTH);
        self.encode_into(instant, &mut out);
        out
    }

    fn encode_into(&self, instant: u64, out: &mut String) {
        let value = if self.inverted {
            u64::MAX - instant
        } else {
            instant
        };
        // Writing to a String cannot fail.
        let _ = write!(out, "{value:0width$}", width = TIME_WIDTH);
    }
}

impl<T> Component<T> for TimeComponent {
    fn kind(&self) -> SegmentKind {
        if self.inverted {
            SegmentKind::InverseTime
        } else {
            SegmentKind::Time
        }
    }

    fn render(&self, _record: &T, out: &mut String) {
        let instant = self.precision.from_micros(self.clock.now_micros());
        self.encode_into(instant, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn component(inverted: bool) -> TimeComponent {
        TimeComponent::new(inverted, TimePrecision::Millis, Arc::new(ManualClock::new(0)))
    }

    #[test]
    fn fixed_width() {
        for instant in [0, 1, 1_700_000_000_000, u64::MAX] {
            assert_eq!(component(false).encode(instant).len(), TIME_WIDTH);
            assert_eq!(component(true).encode(instant).len(), TIME_WIDTH);
        }
    }

    #[test]
    fn ascending_order() {
        let c = component(false);
        assert!(c.encode(999) < c.encode(1_000));
        assert_eq!(c.encode(42), "00000000000000000042");
    }

    #[test]
    fn inverted_order() {
        let c = component(true);
        assert!(c.encode(1_000) < c.encode(999));
        assert_eq!(c.encode(0), u64::MAX.to_string());
        assert_eq!(c.encode(u64::MAX), "0".repeat(TIME_WIDTH));
    }

    #[test]
    fn renders_clock_at_precision() {
        let clock = Arc::new(ManualClock::new(1_234_567));
        let millis = TimeComponent::new(false, TimePrecision::Millis, clock.clone());
        let micros = TimeComponent::new(false, TimePrecision::Micros, clock);

        let mut out = String::new();
        Component::<()>::render(&millis, &(), &mut out);
        assert_eq!(out, "00000000000000001234");

        out.clear();
        Component::<()>::render(&micros, &(), &mut out);
        assert_eq!(out, "00000000000001234567");
    }

    #[test]
    fn kinds() {
        assert_eq!(Component::<()>::kind(&component(false)), SegmentKind::Time);
        assert_eq!(Component::<()>::kind(&component(true)), SegmentKind::InverseTime);
    }
}

//! Key engine configuration.

use crate::clock::{Clock, SystemClock};
use std::sync::Arc;

/// How UUID segments are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidFormat {
    /// 36 characters, `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
    #[default]
    Hyphenated,
    /// 32 lower-case hex characters without dashes.
    Simple,
}

/// Resolution of time segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePrecision {
    /// Milliseconds since the Unix epoch.
    #[default]
    Millis,
    /// Microseconds since the Unix epoch.
    Micros,
}

impl TimePrecision {
    /// Truncates a microsecond instant to this precision.
    #[must_use]
    pub const fn from_micros(self, micros: u64) -> u64 {
        match self {
            TimePrecision::Millis => micros / 1_000,
            TimePrecision::Micros => micros,
        }
    }
}

/// Configuration for a [`KeyEngine`](crate::KeyEngine).
///
/// The configuration is fixed when the engine is built. Pipelines capture the
/// parts they need at compile time.
#[derive(Debug, Clone)]
pub struct KeyConfig {
    /// Text inserted between consecutive segments. Empty by default.
    pub separator: String,

    /// Rendering of UUID segments.
    pub uuid_format: UuidFormat,

    /// Resolution of time segments.
    pub time_precision: TimePrecision,

    /// Time source for time segments.
    pub clock: Arc<dyn Clock>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            separator: String::new(),
            uuid_format: UuidFormat::Hyphenated,
            time_precision: TimePrecision::Millis,
            clock: Arc::new(SystemClock),
        }
    }
}

impl KeyConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the UUID rendering.
    #[must_use]
    pub fn uuid_format(mut self, format: UuidFormat) -> Self {
        self.uuid_format = format;
        self
    }

    /// Sets the time segment resolution.
    #[must_use]
    pub fn time_precision(mut self, precision: TimePrecision) -> Self {
        self.time_precision = precision;
        self
    }

    /// Sets the time source.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn default_config() {
        let config = KeyConfig::default();
        assert!(config.separator.is_empty());
        assert_eq!(config.uuid_format, UuidFormat::Hyphenated);
        assert_eq!(config.time_precision, TimePrecision::Millis);
    }

    #[test]
    fn builder_pattern() {
        let config = KeyConfig::new()
            .separator("|")
            .uuid_format(UuidFormat::Simple)
            .time_precision(TimePrecision::Micros)
            .clock(Arc::new(ManualClock::new(7)));

        assert_eq!(config.separator, "|");
        assert_eq!(config.uuid_format, UuidFormat::Simple);
        assert_eq!(config.time_precision, TimePrecision::Micros);
        assert_eq!(config.clock.now_micros(), 7);
    }

    #[test]
    fn precision_truncates() {
        assert_eq!(TimePrecision::Millis.from_micros(1_999), 1);
        assert_eq!(TimePrecision::Micros.from_micros(1_999), 1_999);
    }
}

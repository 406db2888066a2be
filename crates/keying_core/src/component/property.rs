//! Property segments.

use crate::component::Component;
use crate::schema::PropertyReader;
use crate::segment::SegmentKind;
use std::fmt;

/// Renders one named property of the record.
pub struct PropertyComponent<T> {
    name: String,
    read: PropertyReader<T>,
}

impl<T> PropertyComponent<T> {
    /// Binds a property name to its reader.
    pub fn new(name: impl Into<String>, read: PropertyReader<T>) -> Self {
        Self {
            name: name.into(),
            read,
        }
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Component<T> for PropertyComponent<T> {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Property
    }

    fn render(&self, record: &T, out: &mut String) {
        out.push_str(&(self.read)(record));
    }
}

impl<T> fmt::Debug for PropertyComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyComponent")
            .field("name", &self.name)
            .finish()
    }
}

//! Field accessors binding a key strategy to a record type.
//!
//! A record type opts into keying by implementing [`Keyed`]. Its [`Schema`]
//! names the single identifier field and exposes the properties a strategy
//! may read. Nothing is discovered at runtime: a property a strategy asks for
//! must have been registered on the schema, otherwise compilation fails.

use crate::segment::Strategy;
use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Reads one property of a record and renders it as a key segment.
pub type PropertyReader<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Identifies a record type in the pipeline cache.
///
/// Two values are equal only if the Rust type, the name and the declaration
/// all match, so several runtime-defined types may share one Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordType {
    id: TypeId,
    name: Cow<'static, str>,
    declaration: Option<String>,
}

impl RecordType {
    /// Returns the record type of a Rust type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: Cow::Borrowed(type_name::<T>()),
            declaration: None,
        }
    }

    /// Returns a named record type backed by the Rust type `T`.
    #[must_use]
    pub fn named<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: Cow::Owned(name.into()),
            declaration: None,
        }
    }

    /// Returns a named record type whose identity also covers `declaration`.
    ///
    /// Types sharing a name but declared differently get distinct pipelines.
    #[must_use]
    pub fn declared<T: 'static>(name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            declaration: Some(declaration.into()),
            ..Self::named::<T>(name)
        }
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read and write access to a record's identifier field.
pub struct IdField<T> {
    name: &'static str,
    get: fn(&T) -> Option<&str>,
    set: fn(&mut T, String),
}

impl<T> IdField<T> {
    /// Creates an identifier accessor.
    pub const fn new(name: &'static str, get: fn(&T) -> Option<&str>, set: fn(&mut T, String)) -> Self {
        Self { name, get, set }
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the current identifier.
    pub fn read<'a>(&self, record: &'a T) -> Option<&'a str> {
        (self.get)(record)
    }

    /// Overwrites the identifier.
    pub fn write(&self, record: &mut T, key: String) {
        (self.set)(record, key);
    }

    /// Returns true if the identifier holds a non-empty value.
    pub fn is_set(&self, record: &T) -> bool {
        self.read(record).is_some_and(|key| !key.is_empty())
    }
}

impl<T> Clone for IdField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IdField<T> {}

impl<T> fmt::Debug for IdField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdField").field("name", &self.name).finish()
    }
}

/// The key declaration of a record type.
///
/// # Example
///
/// ```rust
/// use keying_core::{IdField, Keyed, Schema, SegmentKind, Strategy};
///
/// struct Order {
///     key: Option<String>,
///     id: u64,
/// }
///
/// impl Keyed for Order {
///     fn schema(&self) -> Schema<Self> {
///         let strategy = Strategy::new([SegmentKind::InverseTime, SegmentKind::Property])
///             .with_properties(["id"]);
///         Schema::new(
///             strategy,
///             IdField::new("key", |o: &Order| o.key.as_deref(), |o, key| o.key = Some(key)),
///         )
///         .property("id", |o: &Order| o.id.to_string())
///     }
/// }
/// ```
pub struct Schema<T> {
    strategy: Strategy,
    id: IdField<T>,
    properties: Vec<(String, PropertyReader<T>)>,
}

impl<T> Schema<T> {
    /// Creates a schema with no readable properties.
    #[must_use]
    pub fn new(strategy: Strategy, id: IdField<T>) -> Self {
        Self {
            strategy,
            id,
            properties: Vec::new(),
        }
    }

    /// Registers a readable property.
    ///
    /// Registering the same name twice replaces the earlier reader.
    #[must_use]
    pub fn property<F>(mut self, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        self.properties.retain(|(existing, _)| *existing != name);
        self.properties.push((name, Arc::new(read)));
        self
    }

    /// Returns the declared strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Returns the identifier accessor.
    #[must_use]
    pub fn id_field(&self) -> IdField<T> {
        self.id
    }

    /// Looks up the reader for a property.
    #[must_use]
    pub fn reader(&self, name: &str) -> Option<PropertyReader<T>> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, read)| Arc::clone(read))
    }

    /// Returns the registered property names.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("strategy", &self.strategy)
            .field("id", &self.id)
            .field("properties", &self.property_names().collect::<Vec<_>>())
            .finish()
    }
}

/// A record type whose identifier is assigned by a key strategy.
pub trait Keyed: Sized + 'static {
    /// Returns the key declaration of this record's type.
    ///
    /// Called once per record type, when its pipeline is first compiled.
    fn schema(&self) -> Schema<Self>;

    /// Returns the cache identity of this record's type.
    fn record_type(&self) -> RecordType {
        RecordType::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentKind;

    struct Note {
        key: Option<String>,
        title: String,
    }

    fn note_schema() -> Schema<Note> {
        Schema::new(
            Strategy::new([SegmentKind::Property]).with_properties(["title"]),
            IdField::new("key", |n: &Note| n.key.as_deref(), |n, key| n.key = Some(key)),
        )
        .property("title", |n: &Note| n.title.clone())
    }

    #[test]
    fn id_field_reads_and_writes() {
        let id = note_schema().id_field();
        let mut note = Note {
            key: None,
            title: "a".into(),
        };
        assert!(!id.is_set(&note));

        id.write(&mut note, String::new());
        assert!(!id.is_set(&note), "empty key counts as unset");

        id.write(&mut note, "k1".into());
        assert_eq!(id.read(&note), Some("k1"));
        assert!(id.is_set(&note));
        assert_eq!(id.name(), "key");
    }

    #[test]
    fn readers_by_name() {
        let schema = note_schema();
        let note = Note {
            key: None,
            title: "hello".into(),
        };
        let read = schema.reader("title").unwrap();
        assert_eq!(read(&note), "hello");
        assert!(schema.reader("body").is_none());
    }

    #[test]
    fn property_reregistration_replaces() {
        let schema = note_schema().property("title", |_: &Note| "fixed".to_string());
        assert_eq!(schema.property_names().count(), 1);
        let note = Note {
            key: None,
            title: "hello".into(),
        };
        assert_eq!(schema.reader("title").unwrap()(&note), "fixed");
    }

    #[test]
    fn record_type_identity() {
        assert_eq!(RecordType::of::<Note>(), RecordType::of::<Note>());
        assert_ne!(RecordType::of::<Note>(), RecordType::of::<String>());
        assert_ne!(
            RecordType::named::<Note>("a"),
            RecordType::named::<Note>("b")
        );
        assert_eq!(RecordType::named::<Note>("a").to_string(), "a");

        let declared = RecordType::declared::<Note>("a", "[UUID]");
        assert_ne!(declared, RecordType::named::<Note>("a"));
        assert_ne!(declared, RecordType::declared::<Note>("a", "[TIME]"));
        assert_eq!(declared, RecordType::declared::<Note>("a", "[UUID]"));
        assert_eq!(declared.to_string(), "a");
    }
}

//! Fixture record types and pinned engines.

use keying_core::{IdField, KeyConfig, KeyEngine, Keyed, ManualClock, Schema, SegmentKind, Strategy};
use keying_store::InMemoryDao;
use std::sync::Arc;

/// An order, keyed newest first: `[INVERSE_TIME, PROPERTY(id)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    /// Identifier.
    pub key: Option<String>,
    /// Order number.
    pub id: String,
    /// Customer name.
    pub customer: String,
}

impl Order {
    /// Creates an unkeyed order.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Keyed for Order {
    fn schema(&self) -> Schema<Self> {
        Schema::new(
            Strategy::new([SegmentKind::InverseTime, SegmentKind::Property]).with_properties(["id"]),
            IdField::new("key", |o: &Order| o.key.as_deref(), |o, key| o.key = Some(key)),
        )
        .property("id", |o: &Order| o.id.clone())
        .property("customer", |o: &Order| o.customer.clone())
    }
}

/// An audit event, grouped by source then ordered oldest first:
/// `[PROPERTY(source), TIME, PROPERTY(seq)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Identifier.
    pub key: Option<String>,
    /// Emitting system.
    pub source: String,
    /// Sequence number within the millisecond.
    pub seq: u32,
}

impl Event {
    /// Creates an unkeyed event.
    pub fn new(source: impl Into<String>, seq: u32) -> Self {
        Self {
            key: None,
            source: source.into(),
            seq,
        }
    }
}

impl Keyed for Event {
    fn schema(&self) -> Schema<Self> {
        Schema::new(
            Strategy::new([SegmentKind::Property, SegmentKind::Time, SegmentKind::Property])
                .with_properties(["source", "seq"]),
            IdField::new("key", |e: &Event| e.key.as_deref(), |e, key| e.key = Some(key)),
        )
        .property("source", |e: &Event| format!("{}:", e.source))
        .property("seq", |e: &Event| format!(":{:04}", e.seq))
    }
}

/// A login session with an opaque random key: `[UUID]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Identifier.
    pub key: Option<String>,
    /// Owning user.
    pub user: String,
}

impl Keyed for Session {
    fn schema(&self) -> Schema<Self> {
        Schema::new(
            Strategy::new([SegmentKind::Uuid]),
            IdField::new("key", |s: &Session| s.key.as_deref(), |s, key| s.key = Some(key)),
        )
        .property("user", |s: &Session| s.user.clone())
    }
}

/// A record with a rejected strategy: a lone `TIME` segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heartbeat {
    /// Identifier.
    pub key: Option<String>,
}

impl Keyed for Heartbeat {
    fn schema(&self) -> Schema<Self> {
        Schema::new(
            Strategy::new([SegmentKind::Time]),
            IdField::new("key", |h: &Heartbeat| h.key.as_deref(), |h, key| h.key = Some(key)),
        )
    }
}

/// Creates an engine whose clock reads `millis` until moved.
pub fn pinned_engine(millis: u64) -> (KeyEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::from_millis(millis));
    let engine = KeyEngine::with_config(KeyConfig::new().clock(clock.clone()));
    (engine, clock)
}

/// Creates an in-memory store over a pinned engine.
pub fn pinned_dao<T: Keyed + Clone>(millis: u64) -> (InMemoryDao<T>, Arc<ManualClock>) {
    let (engine, clock) = pinned_engine(millis);
    (InMemoryDao::new(Arc::new(engine)), clock)
}

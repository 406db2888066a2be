//! # Keying Core
//!
//! Structured, sortable record identifiers for key-value stores.
//!
//! A record type declares an ordered key [`Strategy`] of segments:
//! - `PROPERTY`: the rendered value of a named field
//! - `UUID`: a fresh random UUID
//! - `TIME`: the current instant, oldest first
//! - `INVERSE_TIME`: the current instant, newest first
//!
//! The [`KeyEngine`] compiles each type's strategy once into a [`Pipeline`],
//! caches it, and uses it to stamp a record's identifier ([`KeyEngine::key`])
//! or to preview the identifier without touching the record
//! ([`KeyEngine::compute`]).
//!
//! ## Example
//!
//! ```rust
//! use keying_core::{IdField, KeyEngine, Keyed, Schema, SegmentKind, Strategy};
//!
//! struct Order {
//!     key: Option<String>,
//!     id: u64,
//! }
//!
//! impl Keyed for Order {
//!     fn schema(&self) -> Schema<Self> {
//!         Schema::new(
//!             Strategy::new([SegmentKind::InverseTime, SegmentKind::Property])
//!                 .with_properties(["id"]),
//!             IdField::new("key", |o: &Order| o.key.as_deref(), |o, key| o.key = Some(key)),
//!         )
//!         .property("id", |o: &Order| o.id.to_string())
//!     }
//! }
//!
//! let engine = KeyEngine::new();
//! let mut order = Order { key: None, id: 42 };
//! engine.key(&mut order).unwrap();
//! assert!(order.key.unwrap().ends_with("42"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod clock;
pub mod component;
mod config;
mod dynamic;
mod engine;
mod error;
mod pipeline;
mod schema;
mod segment;
mod stats;

pub use cache::PipelineCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use component::{Component, Determinism, TIME_WIDTH};
pub use config::{KeyConfig, TimePrecision, UuidFormat};
pub use dynamic::{DynamicRecord, DynamicType};
pub use engine::KeyEngine;
pub use error::{KeyError, KeyResult};
pub use pipeline::Pipeline;
pub use schema::{IdField, Keyed, PropertyReader, RecordType, Schema};
pub use segment::{SegmentKind, Strategy};
pub use stats::{EngineStats, StatsSnapshot};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

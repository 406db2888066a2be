//! # Keying Store
//!
//! The data-access side of keying.
//!
//! [`KeyedDao`] is the interface a persistence layer offers for keyed
//! records. Every save runs the record through
//! [`KeyEngine::key`](keying_core::KeyEngine::key) first, so a record is
//! never persisted without an identifier.
//!
//! ## Available stores
//!
//! - [`InMemoryDao`] - An ordered in-memory map, for tests and ephemeral data
//!
//! ## Example
//!
//! ```rust
//! use keying_core::{IdField, KeyEngine, Keyed, Schema, SegmentKind, Strategy};
//! use keying_store::{InMemoryDao, KeyedDao};
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Note {
//!     key: Option<String>,
//!     author: String,
//! }
//!
//! impl Keyed for Note {
//!     fn schema(&self) -> Schema<Self> {
//!         Schema::new(
//!             Strategy::new([SegmentKind::Property, SegmentKind::InverseTime])
//!                 .with_properties(["author"]),
//!             IdField::new("key", |n: &Note| n.key.as_deref(), |n, key| n.key = Some(key)),
//!         )
//!         .property("author", |n: &Note| n.author.clone())
//!     }
//! }
//!
//! let dao = InMemoryDao::new(Arc::new(KeyEngine::new()));
//! let id = dao.save(Note { key: None, author: "ann".into() }).unwrap();
//! assert!(id.starts_with("ann"));
//! assert_eq!(dao.find_by_prefix("ann").unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod dao;
mod error;
mod memory;
mod range;

pub use dao::KeyedDao;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDao;
pub use range::{prefix_range, prefix_successor};

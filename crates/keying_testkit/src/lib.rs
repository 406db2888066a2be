//! # Keying Testkit
//!
//! Test utilities for keying.
//!
//! This crate provides:
//! - Fixture record types with representative key strategies
//! - Engines and stores pinned to a manual clock
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keying_testkit::prelude::*;
//!
//! #[test]
//! fn newest_first() {
//!     let (engine, clock) = pinned_engine(1_000);
//!     let older = engine.compute(&Order::new("1")).unwrap();
//!     clock.advance(1_000);
//!     assert!(engine.compute(&Order::new("1")).unwrap() < older);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;

//! CLI command implementations.

pub mod compute;
pub mod key;
pub mod validate;

use crate::input::InputError;
use keying_core::{DynamicRecord, Pipeline};
use serde::Serialize;

/// A key produced by `compute` or `key`.
#[derive(Debug, Serialize)]
pub struct KeyOutput {
    /// Record type name.
    pub record_type: String,
    /// Segment kinds, in order.
    pub segments: Vec<String>,
    /// The key.
    pub key: String,
}

impl KeyOutput {
    /// Describes `key` as produced by `pipeline`.
    pub fn new(pipeline: &Pipeline<DynamicRecord>, key: String) -> Self {
        Self {
            record_type: pipeline.record_type().name().to_string(),
            segments: pipeline.kinds().map(|kind| kind.to_string()).collect(),
            key,
        }
    }

    /// Renders as plain text or pretty JSON.
    pub fn render(&self, json: bool) -> Result<String, InputError> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.key.clone())
        }
    }
}

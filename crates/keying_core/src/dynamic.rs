//! Record types registered at runtime.
//!
//! A [`DynamicType`] declares a name, a strategy and the fields its records
//! carry. [`DynamicRecord`]s of that type hold string values and are keyed
//! like any other [`Keyed`] type. Pipelines are cached by type name and
//! declaration, so two types reusing a name with different strategies or
//! fields never share a pipeline.

use crate::error::{KeyError, KeyResult};
use crate::schema::{IdField, Keyed, RecordType, Schema};
use crate::segment::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A runtime record type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicType {
    /// Type name, used as the cache identity.
    pub name: String,
    /// Key strategy.
    pub strategy: Strategy,
    /// Fields records of this type may carry.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl DynamicType {
    /// Declares a dynamic type.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        strategy: Strategy,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            strategy,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Declares a dynamic type whose fields are exactly the strategy's properties.
    pub fn from_strategy(name: impl Into<String>, strategy: Strategy) -> Self {
        let fields = strategy.properties.clone();
        Self::new(name, strategy, fields)
    }

    /// Returns true if records of this type may carry `field`.
    #[must_use]
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Returns the canonical form of everything that shapes this type's pipeline.
    #[must_use]
    pub fn declaration(&self) -> String {
        format!(
            "{:?};{:?};{:?}",
            self.strategy.segments, self.strategy.properties, self.fields
        )
    }
}

/// A record of a [`DynamicType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRecord {
    ty: Arc<DynamicType>,
    values: BTreeMap<String, String>,
    key: Option<String>,
}

impl DynamicRecord {
    /// Creates an empty, unkeyed record.
    #[must_use]
    pub fn new(ty: Arc<DynamicType>) -> Self {
        Self {
            ty,
            values: BTreeMap::new(),
            key: None,
        }
    }

    /// Returns the record's type.
    #[must_use]
    pub fn dynamic_type(&self) -> &Arc<DynamicType> {
        &self.ty
    }

    /// Sets a field value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidRecord`] if the type does not declare `field`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> KeyResult<()> {
        if !self.ty.declares(field) {
            return Err(KeyError::invalid_record(format!(
                "{} does not declare field {field:?}",
                self.ty.name
            )));
        }
        self.values.insert(field.to_string(), value.into());
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidRecord`] if the type does not declare `field`.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> KeyResult<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Returns a field value, if set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Returns the identifier, if set.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Sets the identifier, e.g. for a record loaded from storage.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Keyed for DynamicRecord {
    fn schema(&self) -> Schema<Self> {
        let id = IdField::new(
            "key",
            |r: &DynamicRecord| r.key.as_deref(),
            |r, key| r.key = Some(key),
        );
        // Unset fields render as empty segments.
        self.ty.fields.iter().fold(
            Schema::new(self.ty.strategy.clone(), id),
            |schema, field| {
                let name = field.clone();
                schema.property(field.as_str(), move |r: &DynamicRecord| {
                    r.get(&name).unwrap_or_default().to_string()
                })
            },
        )
    }

    fn record_type(&self) -> RecordType {
        RecordType::declared::<Self>(self.ty.name.clone(), self.ty.declaration())
    }
}

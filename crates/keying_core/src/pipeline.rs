//! Compiled key strategies.

use crate::component::{
    Component, Determinism, PropertyComponent, TimeComponent, UuidComponent,
};
use crate::config::KeyConfig;
use crate::error::{KeyError, KeyResult};
use crate::schema::{IdField, RecordType, Schema};
use crate::segment::SegmentKind;
use std::fmt;

/// The executable form of one record type's strategy.
///
/// A pipeline is immutable once compiled. It owns one component per declared
/// segment, in strategy order, plus the accessor for the identifier field.
pub struct Pipeline<T> {
    record_type: RecordType,
    components: Vec<Box<dyn Component<T>>>,
    id: IdField<T>,
    separator: String,
}

impl<T: 'static> Pipeline<T> {
    /// Compiles a schema into a pipeline.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if:
    /// - the strategy has no segments
    /// - the `PROPERTY` segments and property names do not pair up exactly
    /// - a property name is not registered on the schema
    /// - the strategy is a lone `TIME` or `INVERSE_TIME` segment
    pub fn compile(record_type: RecordType, schema: &Schema<T>, config: &KeyConfig) -> KeyResult<Self> {
        let strategy = schema.strategy();
        let name = record_type.name();
        if strategy.segments.is_empty() {
            return Err(KeyError::empty_strategy(name));
        }

        let mismatch = || {
            KeyError::property_count_mismatch(
                name,
                strategy.property_segments(),
                strategy.properties.len(),
            )
        };

        let mut names = strategy.properties.iter();
        let mut components: Vec<Box<dyn Component<T>>> =
            Vec::with_capacity(strategy.segments.len());

        for &kind in &strategy.segments {
            let component: Box<dyn Component<T>> = match kind {
                SegmentKind::Property => {
                    let property = names.next().ok_or_else(mismatch)?;
                    let read = schema
                        .reader(property)
                        .ok_or_else(|| KeyError::unknown_property(name, property.as_str()))?;
                    Box::new(PropertyComponent::new(property.as_str(), read))
                }
                SegmentKind::Uuid => Box::new(UuidComponent::new(config.uuid_format)),
                SegmentKind::Time | SegmentKind::InverseTime => {
                    if strategy.segments.len() == 1 {
                        return Err(KeyError::time_only(name));
                    }
                    Box::new(TimeComponent::new(
                        kind == SegmentKind::InverseTime,
                        config.time_precision,
                        config.clock.clone(),
                    ))
                }
            };
            components.push(component);
        }

        if names.next().is_some() {
            return Err(mismatch());
        }

        Ok(Self {
            record_type,
            components,
            id: schema.id_field(),
            separator: config.separator.clone(),
        })
    }
}

impl<T> Pipeline<T> {
    /// Returns the record type this pipeline was compiled for.
    #[must_use]
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Returns the segment kinds, in order.
    pub fn kinds(&self) -> impl Iterator<Item = SegmentKind> + '_ {
        self.components.iter().map(|c| c.kind())
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the pipeline has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the identifier accessor.
    #[must_use]
    pub fn id_field(&self) -> IdField<T> {
        self.id
    }

    /// Returns the kind of the first component whose output is not reproducible.
    #[must_use]
    pub fn non_deterministic_kind(&self) -> Option<SegmentKind> {
        self.components
            .iter()
            .find(|c| c.determinism() == Determinism::NonDeterministic)
            .map(|c| c.kind())
    }

    /// Returns true if every component is deterministic.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.non_deterministic_kind().is_none()
    }

    /// Returns true if the record's identifier is already populated.
    pub fn is_keyed(&self, record: &T) -> bool {
        self.id.is_set(record)
    }

    /// Concatenates every component's segment for `record`.
    pub fn render(&self, record: &T) -> String {
        let mut out = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }
            component.render(record, &mut out);
        }
        out
    }

    /// Writes a freshly rendered key unless the record is already keyed.
    ///
    /// Returns true if the identifier was written.
    pub fn stamp(&self, record: &mut T) -> bool {
        if self.is_keyed(record) {
            return false;
        }
        let key = self.render(record);
        self.id.write(record, key);
        true
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("record_type", &self.record_type)
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .field("id", &self.id)
            .finish()
    }
}

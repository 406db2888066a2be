//! Property-based test generators using proptest.
//!
//! Provides strategies for generating key strategies and dynamic records
//! that maintain (or deliberately break) the pairing invariants.

use keying_core::{DynamicRecord, DynamicType, SegmentKind, Strategy as KeyStrategy};
use proptest::prelude::*;
use std::sync::Arc;

/// Strategy for generating any segment kind.
pub fn segment_kind_strategy() -> impl Strategy<Value = SegmentKind> {
    prop::sample::select(SegmentKind::ALL.to_vec())
}

/// Names the properties of a segment list `f0`, `f1`, ...
fn with_generated_names(segments: Vec<SegmentKind>) -> KeyStrategy {
    let count = segments
        .iter()
        .filter(|kind| **kind == SegmentKind::Property)
        .count();
    KeyStrategy::new(segments).with_properties((0..count).map(|i| format!("f{i}")))
}

/// Builds valid strategies of up to `max_len` segments drawn from `kinds`.
fn strategy_from(kinds: Vec<SegmentKind>, max_len: usize) -> impl Strategy<Value = KeyStrategy> {
    prop::collection::vec(prop::sample::select(kinds), 1..=max_len.max(1))
        .prop_filter("a lone time segment is not a valid key", |segments| {
            !(segments.len() == 1 && segments[0].is_time())
        })
        .prop_map(with_generated_names)
}

/// Strategy for generating valid key strategies of up to `max_len` segments.
///
/// Property names pair up exactly with `PROPERTY` segments and lone time
/// segments are never produced.
pub fn balanced_strategy(max_len: usize) -> impl Strategy<Value = KeyStrategy> {
    strategy_from(SegmentKind::ALL.to_vec(), max_len)
}

/// Strategy for generating valid key strategies without `UUID` segments.
pub fn deterministic_strategy(max_len: usize) -> impl Strategy<Value = KeyStrategy> {
    let kinds = SegmentKind::ALL
        .into_iter()
        .filter(|kind| *kind != SegmentKind::Uuid)
        .collect();
    strategy_from(kinds, max_len)
}

/// Strategy for generating valid key strategies with at least one `UUID` segment.
pub fn uuid_strategy(max_len: usize) -> impl Strategy<Value = KeyStrategy> {
    (balanced_strategy(max_len), any::<prop::sample::Index>()).prop_map(|(mut s, at)| {
        let at = at.index(s.segments.len() + 1);
        s.segments.insert(at, SegmentKind::Uuid);
        s
    })
}

/// Strategy for generating key strategies with one property name too many or too few.
pub fn unbalanced_strategy(max_len: usize) -> impl Strategy<Value = KeyStrategy> {
    (balanced_strategy(max_len), any::<bool>()).prop_map(|(mut s, extra)| {
        if extra || s.properties.is_empty() {
            s.properties.push(format!("f{}", s.properties.len()));
        } else {
            s.properties.pop();
        }
        s
    })
}

/// Strategy for generating non-empty property values.
pub fn field_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,12}").expect("Invalid regex")
}

/// Strategy for generating an unkeyed record of a dynamic type built from `strategy`.
pub fn record_strategy(strategy: KeyStrategy) -> impl Strategy<Value = DynamicRecord> {
    let ty = Arc::new(DynamicType::from_strategy("generated", strategy));
    let fields = ty.fields.len();
    prop::collection::vec(field_value_strategy(), fields).prop_map(move |values| {
        let mut record = DynamicRecord::new(Arc::clone(&ty));
        for (field, value) in ty.fields.iter().zip(values) {
            record
                .set(field, value)
                .expect("generated fields are declared");
        }
        record
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pinned_engine, Order};
    use keying_core::{KeyEngine, KeyError};

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn balanced_strategies_compile_once(
            record in balanced_strategy(6).prop_flat_map(record_strategy)
        ) {
            let engine = KeyEngine::new();
            let first = engine.pipeline(&record).unwrap();
            let second = engine.pipeline(&record).unwrap();
            prop_assert!(Arc::ptr_eq(&first, &second));
            prop_assert_eq!(engine.stats().compilations, 1);
            prop_assert_eq!(
                first.kinds().collect::<Vec<_>>(),
                record.dynamic_type().strategy.segments.clone()
            );
        }

        #[test]
        fn key_is_idempotent(
            record in balanced_strategy(6).prop_flat_map(record_strategy)
        ) {
            let (engine, clock) = pinned_engine(1_000);
            let mut record = record;
            engine.key(&mut record).unwrap();
            let first = record.key().map(str::to_string);
            prop_assert!(first.as_deref().is_some_and(|k| !k.is_empty()));

            clock.advance(1_000_000);
            engine.key(&mut record).unwrap();
            prop_assert_eq!(record.key().map(str::to_string), first);
        }

        #[test]
        fn compute_is_repeatable(
            record in deterministic_strategy(6).prop_flat_map(record_strategy)
        ) {
            let (engine, _) = pinned_engine(1_000);
            let first = engine.compute(&record).unwrap();
            let second = engine.compute(&record).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert!(record.key().is_none());
        }

        #[test]
        fn compute_refuses_uuid(
            record in uuid_strategy(5).prop_flat_map(record_strategy),
            keyed in any::<bool>()
        ) {
            let engine = KeyEngine::new();
            let mut record = record;
            if keyed {
                engine.key(&mut record).unwrap();
            }
            let is_non_deterministic = matches!(
                engine.compute(&record),
                Err(KeyError::NonDeterministic { kind: SegmentKind::Uuid, .. })
            );
            prop_assert!(is_non_deterministic);
        }

        #[test]
        fn unbalanced_strategies_are_rejected(strategy in unbalanced_strategy(6)) {
            let ty = Arc::new(DynamicType::from_strategy("generated", strategy));
            let result = KeyEngine::new().prepare(&DynamicRecord::new(ty));
            let is_mismatch = matches!(result, Err(KeyError::PropertyCountMismatch { .. }));
            prop_assert!(is_mismatch);
        }

        #[test]
        fn later_orders_sort_first(start in 0u64..1 << 50, gap in 1u64..1 << 20) {
            let (engine, clock) = pinned_engine(start);
            let older = engine.compute(&Order::new("42")).unwrap();
            clock.advance(gap * 1_000);
            let newer = engine.compute(&Order::new("42")).unwrap();
            prop_assert!(newer < older);
        }
    }

    #[test]
    fn lone_time_strategies_are_rejected() {
        for kind in [SegmentKind::Time, SegmentKind::InverseTime] {
            let ty = Arc::new(DynamicType::from_strategy("clock", KeyStrategy::new([kind])));
            assert!(matches!(
                KeyEngine::new().prepare(&DynamicRecord::new(ty)),
                Err(KeyError::TimeOnlyStrategy { .. })
            ));
        }
    }

    #[test]
    fn generated_names_pair_with_segments() {
        let s = with_generated_names(vec![
            SegmentKind::Property,
            SegmentKind::Uuid,
            SegmentKind::Property,
        ]);
        assert_eq!(s.properties, vec!["f0".to_string(), "f1".to_string()]);
    }
}

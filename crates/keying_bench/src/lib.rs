//! Benchmark helpers for keying.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use keying_core::{DynamicRecord, DynamicType, SegmentKind, Strategy};
use std::sync::Arc;

/// Builds a dynamic record with `properties` PROPERTY segments behind an
/// `INVERSE_TIME` segment.
pub fn wide_record(properties: usize) -> DynamicRecord {
    let segments = std::iter::once(SegmentKind::InverseTime)
        .chain(std::iter::repeat(SegmentKind::Property).take(properties));
    let names: Vec<String> = (0..properties).map(|i| format!("f{i}")).collect();
    let strategy = Strategy::new(segments).with_properties(names.clone());
    let ty = Arc::new(DynamicType::new(format!("wide{properties}"), strategy, names.clone()));

    let mut record = DynamicRecord::new(ty);
    for name in &names {
        record
            .set(name, format!("value-of-{name}"))
            .expect("declared above");
    }
    record
}

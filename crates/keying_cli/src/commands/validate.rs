//! Validate command implementation.

use crate::input::{InputError, TypeArgs};
use keying_core::{DynamicRecord, KeyEngine};
use std::sync::Arc;
use tracing::info;

/// Compiles the described type and summarises its pipeline.
pub fn run(ty: &TypeArgs) -> Result<String, InputError> {
    let dynamic = ty.dynamic_type()?;
    info!("Validating key strategy for {}", dynamic.name);

    let strategy = dynamic.strategy.to_string();
    let record = DynamicRecord::new(Arc::new(dynamic));
    let engine = KeyEngine::new();
    let pipeline = engine.pipeline(&record)?;

    let determinism = if pipeline.is_deterministic() {
        "deterministic"
    } else {
        "non-deterministic"
    };
    Ok(format!(
        "{}: {} ({} segment(s), {})",
        pipeline.record_type(),
        strategy,
        pipeline.len(),
        determinism
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strategy: &str, properties: &[&str]) -> TypeArgs {
        TypeArgs {
            strategy: Some(strategy.into()),
            properties: properties.iter().map(|p| p.to_string()).collect(),
            name: "order".into(),
            ..TypeArgs::default()
        }
    }

    #[test]
    fn valid_strategy_summary() {
        let summary = run(&args("INVERSE_TIME,PROPERTY", &["id"])).unwrap();
        assert_eq!(
            summary,
            "order: INVERSE_TIME,PROPERTY(id) (2 segment(s), deterministic)"
        );

        let summary = run(&args("PROPERTY,UUID", &["id"])).unwrap();
        assert!(summary.ends_with("non-deterministic)"));
    }

    #[test]
    fn invalid_strategies() {
        assert!(run(&args("TIME", &[])).is_err());
        assert!(run(&args("PROPERTY,PROPERTY", &["id"])).is_err());
        assert!(run(&args("PROPERTY", &["id", "extra"])).is_err());
    }
}

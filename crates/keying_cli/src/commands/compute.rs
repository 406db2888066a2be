//! Compute command implementation.

use crate::commands::KeyOutput;
use crate::input::{InputError, RecordArgs, TypeArgs};
use tracing::debug;

/// Previews the key of the described record.
pub fn run(ty: &TypeArgs, args: &RecordArgs) -> Result<String, InputError> {
    let record = args.record(ty.dynamic_type()?)?;
    let engine = args.engine();
    let key = engine.compute(&record)?;
    debug!(key = %key, "computed key");

    let pipeline = engine.pipeline(&record)?;
    KeyOutput::new(&pipeline, key).render(args.json())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> TypeArgs {
        TypeArgs {
            strategy: Some("INVERSE_TIME,PROPERTY".into()),
            properties: vec!["id".into()],
            name: "order".into(),
            ..TypeArgs::default()
        }
    }

    fn at(millis: u64, id: &str) -> RecordArgs {
        RecordArgs {
            fields: vec![format!("id={id}")],
            at_millis: Some(millis),
            format: "text".into(),
        }
    }

    #[test]
    fn pinned_clock_preview() {
        let key = run(&order(), &at(1_000, "42")).unwrap();
        assert_eq!(key, format!("{:020}42", u64::MAX - 1_000));
    }

    #[test]
    fn later_order_sorts_first() {
        let older = run(&order(), &at(1_000, "42")).unwrap();
        let newer = run(&order(), &at(1_001, "42")).unwrap();
        assert!(newer < older);
    }

    #[test]
    fn json_output() {
        let mut args = at(0, "7");
        args.format = "json".into();
        let out = run(&order(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["record_type"], "order");
        assert_eq!(value["segments"][0], "INVERSE_TIME");
        assert_eq!(value["key"], format!("{}7", u64::MAX));
    }

    #[test]
    fn uuid_cannot_be_previewed() {
        let ty = TypeArgs {
            strategy: Some("UUID".into()),
            ..TypeArgs::default()
        };
        assert!(matches!(
            run(&ty, &RecordArgs::default()).unwrap_err(),
            InputError::Key(keying_core::KeyError::NonDeterministic { .. })
        ));
    }
}

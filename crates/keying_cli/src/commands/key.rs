//! Key command implementation.

use crate::commands::KeyOutput;
use crate::input::{InputError, RecordArgs, TypeArgs};

/// Stamps a fresh record of the described type and reports its key.
pub fn run(ty: &TypeArgs, args: &RecordArgs) -> Result<String, InputError> {
    let mut record = args.record(ty.dynamic_type()?)?;
    let engine = args.engine();
    engine.key(&mut record)?;

    let key = record.key().unwrap_or_default().to_string();
    let pipeline = engine.pipeline(&record)?;
    KeyOutput::new(&pipeline, key).render(args.json())
}

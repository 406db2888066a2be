//! Record type and record arguments shared by the commands.

use clap::Args;
use keying_core::{
    DynamicRecord, DynamicType, KeyConfig, KeyEngine, KeyError, ManualClock, Strategy,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while turning arguments into records.
#[derive(Debug, Error)]
pub enum InputError {
    /// Neither `--strategy` nor `--schema` was given.
    #[error("either --strategy or --schema is required")]
    MissingStrategy,

    /// A `--field` argument was not `NAME=VALUE`.
    #[error("field {0:?} is not NAME=VALUE")]
    MalformedField(String),

    /// The schema file could not be read.
    #[error("cannot read schema {path:?}: {source}")]
    SchemaRead {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The schema file is not a valid type declaration.
    #[error("invalid schema {path:?}: {source}")]
    SchemaParse {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Command output could not be encoded.
    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),

    /// A keying error.
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Describes the record type.
#[derive(Debug, Clone, Args)]
pub struct TypeArgs {
    /// Comma separated segment kinds, e.g. INVERSE_TIME,PROPERTY
    #[arg(short, long, conflicts_with = "schema")]
    pub strategy: Option<String>,

    /// Property read by the next PROPERTY segment (repeatable, in order)
    #[arg(short = 'p', long = "property")]
    pub properties: Vec<String>,

    /// JSON file declaring {"name", "strategy", "fields"}
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Record type name
    #[arg(short, long, default_value = "record")]
    pub name: String,
}

impl Default for TypeArgs {
    fn default() -> Self {
        Self {
            strategy: None,
            properties: Vec::new(),
            schema: None,
            name: "record".to_string(),
        }
    }
}

impl TypeArgs {
    /// Builds the dynamic type described by the arguments.
    pub fn dynamic_type(&self) -> Result<DynamicType, InputError> {
        if let Some(path) = &self.schema {
            let text = fs::read_to_string(path).map_err(|source| InputError::SchemaRead {
                path: path.clone(),
                source,
            })?;
            return serde_json::from_str(&text).map_err(|source| InputError::SchemaParse {
                path: path.clone(),
                source,
            });
        }

        let list = self.strategy.as_deref().ok_or(InputError::MissingStrategy)?;
        let strategy = Strategy::parse(list)?.with_properties(self.properties.iter().cloned());
        Ok(DynamicType::from_strategy(self.name.clone(), strategy))
    }
}

/// Describes one record of the type.
#[derive(Debug, Clone, Default, Args)]
pub struct RecordArgs {
    /// Field value as NAME=VALUE (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Pin the clock to this many milliseconds since the Unix epoch
    #[arg(long)]
    pub at_millis: Option<u64>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl RecordArgs {
    /// Builds an engine honouring `--at-millis`.
    pub fn engine(&self) -> KeyEngine {
        match self.at_millis {
            Some(millis) => KeyEngine::with_config(
                KeyConfig::new().clock(Arc::new(ManualClock::from_millis(millis))),
            ),
            None => KeyEngine::new(),
        }
    }

    /// Builds an unkeyed record of `ty` from the `--field` arguments.
    pub fn record(&self, ty: DynamicType) -> Result<DynamicRecord, InputError> {
        let mut record = DynamicRecord::new(Arc::new(ty));
        for field in &self.fields {
            let (name, value) = field
                .split_once('=')
                .ok_or_else(|| InputError::MalformedField(field.clone()))?;
            record.set(name.trim(), value)?;
        }
        Ok(record)
    }

    /// Returns true if JSON output was requested.
    pub fn json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keying_core::SegmentKind;
    use std::io::Write;

    fn order_args() -> TypeArgs {
        TypeArgs {
            strategy: Some("INVERSE_TIME,PROPERTY".into()),
            properties: vec!["id".into()],
            name: "order".into(),
            ..TypeArgs::default()
        }
    }

    #[test]
    fn type_from_strategy_flags() {
        let ty = order_args().dynamic_type().unwrap();
        assert_eq!(ty.name, "order");
        assert_eq!(
            ty.strategy.segments,
            vec![SegmentKind::InverseTime, SegmentKind::Property]
        );
        assert_eq!(ty.fields, vec!["id".to_string()]);
    }

    #[test]
    fn type_requires_strategy() {
        let err = TypeArgs::default().dynamic_type().unwrap_err();
        assert!(matches!(err, InputError::MissingStrategy));
    }

    #[test]
    fn type_rejects_unknown_segment() {
        let args = TypeArgs {
            strategy: Some("TIME,SEQUENCE".into()),
            ..TypeArgs::default()
        };
        assert!(matches!(
            args.dynamic_type().unwrap_err(),
            InputError::Key(KeyError::UnknownSegment { .. })
        ));
    }

    #[test]
    fn type_from_schema_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name":"event","strategy":{{"segments":["PROPERTY","TIME"],"properties":["source"]}},"fields":["source","payload"]}}"#
        )
        .unwrap();

        let args = TypeArgs {
            schema: Some(file.path().to_path_buf()),
            ..TypeArgs::default()
        };
        let ty = args.dynamic_type().unwrap();
        assert_eq!(ty.name, "event");
        assert!(ty.declares("payload"));
    }

    #[test]
    fn bad_schema_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = TypeArgs {
            schema: Some(file.path().to_path_buf()),
            ..TypeArgs::default()
        };
        assert!(matches!(
            args.dynamic_type().unwrap_err(),
            InputError::SchemaParse { .. }
        ));
    }

    #[test]
    fn schema_file_with_unknown_segment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name":"event","strategy":{{"segments":["PROPERTY","SEQUENCE"],"properties":["source"]}}}}"#
        )
        .unwrap();

        let args = TypeArgs {
            schema: Some(file.path().to_path_buf()),
            ..TypeArgs::default()
        };
        let err = args.dynamic_type().unwrap_err();
        assert!(matches!(err, InputError::SchemaParse { .. }));
        assert!(err.to_string().contains("SEQUENCE"), "{err}");
    }

    #[test]
    fn default_type_name_matches_flag_default() {
        let ty = TypeArgs {
            strategy: Some("UUID".into()),
            ..TypeArgs::default()
        };
        assert_eq!(ty.dynamic_type().unwrap().name, "record");
    }

    #[test]
    fn record_from_fields() {
        let ty = order_args().dynamic_type().unwrap();
        let args = RecordArgs {
            fields: vec!["id=42".into()],
            ..RecordArgs::default()
        };
        let record = args.record(ty.clone()).unwrap();
        assert_eq!(record.get("id"), Some("42"));

        let bad = RecordArgs {
            fields: vec!["id".into()],
            ..RecordArgs::default()
        };
        assert!(matches!(
            bad.record(ty.clone()).unwrap_err(),
            InputError::MalformedField(_)
        ));

        let undeclared = RecordArgs {
            fields: vec!["total=3".into()],
            ..RecordArgs::default()
        };
        assert!(matches!(
            undeclared.record(ty).unwrap_err(),
            InputError::Key(KeyError::InvalidRecord { .. })
        ));
    }
}

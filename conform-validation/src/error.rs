// Schema and configuration errors

use conform_core::Outcome;
use thiserror::Error;

pub(crate) const SCHEMA_ERROR_PREFIX: &str = "Schema error: ";

/// A schema definition that does not have the required shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid schema: {}", .0.errors().join("; "))]
pub struct SchemaError(Outcome);

impl SchemaError {
    pub(crate) fn new(shape: Outcome) -> Self {
        Self(shape)
    }

    /// The schema's shape outcome, without prefixes.
    pub fn outcome(&self) -> &Outcome {
        &self.0
    }

    /// Flattened messages, each prefixed `Schema error: `.
    pub fn messages(&self) -> Vec<String> {
        self.0
            .errors()
            .into_iter()
            .map(|e| format!("{}{}", SCHEMA_ERROR_PREFIX, e))
            .collect()
    }
}

/// Invalid compiler configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

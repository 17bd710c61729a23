// Error types

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure to interpret a type name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeTagError {
    #[error("Unknown type \"{0}\"")]
    Unknown(String),
}

/// Flattened validation messages, as a `std::error::Error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn messages(&self) -> &[String] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<String>> for ValidationErrors {
    fn from(errors: Vec<String>) -> Self {
        Self::new(errors)
    }
}

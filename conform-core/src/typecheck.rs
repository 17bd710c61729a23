// Basic type classification

use crate::{TypeTagError, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

// ISO 8601 with progressively optional components (year-only is a date),
// ASCII digits only
static ISO_8601_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[0-9]{4}(-[0-9]{2}(-[0-9]{2}(T[0-9]{2}:[0-9]{2}(:[0-9]{2})?(\.[0-9]+)?(([+-][0-9]{2}:[0-9]{2})|Z)?)?)?)?$",
    )
    .unwrap()
});

/// Basic type a schema can require of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Date,
    Null,
    Undefined,
    Function,
}

impl TypeTag {
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Object,
        TypeTag::Array,
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Date,
        TypeTag::Null,
        TypeTag::Undefined,
        TypeTag::Function,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Function => "function",
        }
    }

    /// Does `value` classify as this type? Never panics.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::Array => is_array(value),
            TypeTag::Object => is_object(value),
            TypeTag::Date => is_date(value),
            TypeTag::Null => is_null(value),
            TypeTag::Undefined => matches!(value, Value::Undefined),
            TypeTag::String => matches!(value, Value::String(_)),
            TypeTag::Number => matches!(value, Value::Number(_)),
            TypeTag::Boolean => matches!(value, Value::Bool(_)),
            TypeTag::Function => matches!(value, Value::Function(_)),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TypeTagError::Unknown(s.to_string()))
    }
}

/// Does the value match the given type tag?
pub fn is_type(tag: TypeTag, value: &Value) -> bool {
    tag.matches(value)
}

/// Is the value a string in (possibly partial) ISO 8601 form?
pub fn is_iso_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| ISO_8601_REGEX.is_match(s))
}

/// Is the value a native date or an ISO 8601 string?
pub fn is_date(value: &Value) -> bool {
    matches!(value, Value::Date(_)) || is_iso_string(value)
}

/// Is the value a non-null, non-array, non-date object?
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

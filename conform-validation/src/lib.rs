//! Validators, combinators, and schema compilation for Conform
//!
//! Validators are pure functions from a [`Value`](conform_core::Value) to an
//! [`Outcome`](conform_core::Outcome). This crate provides the built-in ones,
//! the `all` / `some` / `all_while_ok` combinators, and a compiler that turns a
//! declarative schema into a list of validators.
//!
//! # Examples
//!
//! ```
//! use conform_core::{Value, get_errors};
//! use conform_validation::object_validator;
//! use serde_json::json;
//!
//! let schema = Value::from(json!({
//!     "name": { "required": true, "type": "string" },
//!     "age": { "type": "number" }
//! }));
//! let validator = object_validator(&schema);
//!
//! assert!(validator.validate(&Value::from(json!({ "name": "Ada" }))).is_ok());
//!
//! let outcome = validator.validate(&Value::from(json!({ "age": "old" })));
//! assert_eq!(get_errors(&outcome), vec!["Missing required field \"name\""]);
//! ```
//!
//! ## Typed schemas
//!
//! ```
//! use conform_core::{TypeTag, Value};
//! use conform_validation::{ObjectSchema, SchemaRules};
//! use serde_json::json;
//!
//! let validator = ObjectSchema::new()
//!     .field("id", SchemaRules::new().required(true).of_type(TypeTag::Number))
//!     .into_validator();
//!
//! assert!(validator.validate(&Value::from(json!({ "id": 7 }))).is_ok());
//! assert!(validator.validate(&Value::from(json!({ "id": 7, "x": 1 }))).is_err());
//! ```

mod cache;
mod compose;
mod config;
mod error;
mod schema;
mod validators;

pub use cache::{CacheStats, SchemaCompiler};
pub use compose::{all, all_while_ok, some};
pub use config::{CACHE_CAPACITY_VAR, CompilerConfig};
pub use error::{ConfigError, SchemaError};
pub use schema::{
    ArraySchema, CompileMode, ObjectSchema, SchemaRules, array_validator, compile,
    from_array_schema, from_object_schema, from_object_schema_strict, object_validator,
    validate_as_array_schema, validate_as_object_schema,
};
pub use validators::*;

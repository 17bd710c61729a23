// Conform - schema-driven validation of untyped data
//
// Validators are pure functions returning a nested outcome tree; the printer
// flattens that tree into path-qualified messages such as
// `At field "address": at field "zip": 1 failed to typecheck (expected string)`.

// Re-export core functionality
pub use conform_core::*;

// Re-export validators, combinators, and the schema compiler
pub use conform_validation::*;

// Member crates, for callers that want the full paths
pub use conform_core;
pub use conform_validation;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Container,
        ObjectSchema,
        Outcome,
        SchemaCompiler,
        SchemaRules,
        TypeTag,
        Validator,
        Value,
        all,
        all_while_ok,
        array_validator,
        err,
        from_array_schema,
        from_object_schema,
        from_object_schema_strict,
        from_predicate,
        get_errors,
        nested_err,
        object_validator,
        ok,
        some,
    };
}

// Schema compilation
//
// A schema is either a declarative `Value` (an object of field -> rule set,
// or a single rule set for arrays) or its typed form, `ObjectSchema` /
// `ArraySchema`. Declarative schemas are shape-checked first; a malformed
// schema compiles to one validator that always fails with `Schema error: `
// messages.

use crate::error::SchemaError;
use crate::{
    all, all_while_ok, always_err, validate_array_items_have_type, validate_array_items_pass,
    validate_is_array, validate_is_object, validate_obj_has_key, validate_obj_only_has_keys,
    validate_obj_prop_has_type, validate_obj_prop_passes,
};
use conform_core::{Container, Outcome, TypeTag, Validator, Value, err, nested_err, ok};
use once_cell::sync::Lazy;
use std::fmt;
use tracing::{debug, warn};

const NOT_AN_OBJECT: &str = "Schemas must be objects";

// Shape of a single rule set. Keys other than these three are ignored.
static RULE_SET: Lazy<Validator> = Lazy::new(|| {
    all_while_ok([
        Validator::new(validate_is_object),
        all([
            validate_obj_prop_has_type(TypeTag::Boolean, "required"),
            validate_obj_prop_has_type(TypeTag::String, "type"),
            validate_obj_prop_passes(Validator::new(known_type_name), "type"),
            validate_obj_prop_has_type(TypeTag::Function, "validator"),
        ]),
    ])
});

// An empty type name counts as no type
fn known_type_name(value: &Value) -> Outcome {
    match value.as_str() {
        Some(name) if !name.is_empty() => match name.parse::<TypeTag>() {
            Ok(_) => ok(),
            Err(e) => err(e.to_string()),
        },
        _ => ok(),
    }
}

/// How a schema is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileMode {
    /// Object schema, extra fields allowed
    Object,
    /// Object schema, extra fields rejected
    ObjectStrict,
    Array,
}

impl fmt::Display for CompileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileMode::Object => write!(f, "object"),
            CompileMode::ObjectStrict => write!(f, "object-strict"),
            CompileMode::Array => write!(f, "array"),
        }
    }
}

/// Rules for one object field, or for every item of an array.
#[derive(Debug, Clone, Default)]
pub struct SchemaRules {
    pub required: Option<bool>,
    pub type_tag: Option<TypeTag>,
    pub validator: Option<Validator>,
}

/// Rules applied to every item of an array.
pub type ArraySchema = SchemaRules;

impl SchemaRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as required (ignored for array items)
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Require the value to have the given type
    pub fn of_type(mut self, tag: TypeTag) -> Self {
        self.type_tag = Some(tag);
        self
    }

    /// Run a validator on the value
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Parse a declarative rule set, as used for array schemas.
    pub fn parse(schema: &Value) -> Result<Self, SchemaError> {
        match validate_as_array_schema(schema) {
            Outcome::Ok => Ok(Self::from_checked(schema)),
            shape => Err(SchemaError::new(shape)),
        }
    }

    // Caller has already shape-checked `rules`
    fn from_checked(rules: &Value) -> Self {
        Self {
            required: rules.get("required").and_then(Value::as_bool),
            type_tag: rules
                .get("type")
                .and_then(Value::as_str)
                .and_then(|name| name.parse().ok()),
            validator: rules.get("validator").and_then(Value::as_validator).cloned(),
        }
    }

    /// Validators for an array whose items follow these rules.
    pub fn array_validators(&self) -> Vec<Validator> {
        debug!(
            mode = %CompileMode::Array,
            has_type = self.type_tag.is_some(),
            has_validator = self.validator.is_some(),
            "Compiling schema"
        );

        let mut validators = vec![Validator::new(validate_is_array)];
        if let Some(tag) = self.type_tag {
            validators.push(validate_array_items_have_type(tag));
        }
        if let Some(validator) = &self.validator {
            validators.push(validate_array_items_pass(validator.clone()));
        }
        validators
    }

    pub fn into_array_validator(self) -> Validator {
        all_while_ok(self.array_validators())
    }
}

/// Ordered mapping of field name to rules.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, SchemaRules)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field
    pub fn field(mut self, name: impl Into<String>, rules: SchemaRules) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = rules,
            None => self.fields.push((name, rules)),
        }
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaRules)> {
        self.fields.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a declarative object schema.
    pub fn parse(schema: &Value) -> Result<Self, SchemaError> {
        match validate_as_object_schema(schema) {
            Outcome::Ok => Ok(Self {
                fields: schema
                    .as_object()
                    .map(|obj| {
                        obj.iter()
                            .map(|(k, rules)| (k.to_string(), SchemaRules::from_checked(rules)))
                            .collect()
                    })
                    .unwrap_or_default(),
            }),
            shape => Err(SchemaError::new(shape)),
        }
    }

    /// `[is object, required fields, field types, field validators]`.
    ///
    /// Each group runs all of its checks, so every missing field is
    /// reported together.
    pub fn validators(&self) -> Vec<Validator> {
        self.compile(CompileMode::Object)
    }

    /// [`validators`](Self::validators) plus a check rejecting undeclared fields.
    pub fn strict_validators(&self) -> Vec<Validator> {
        self.compile(CompileMode::ObjectStrict)
    }

    /// Strict validators run in order, stopping at the first failing group.
    pub fn into_validator(self) -> Validator {
        all_while_ok(self.strict_validators())
    }

    fn compile(&self, mode: CompileMode) -> Vec<Validator> {
        debug!(mode = %mode, fields = self.fields.len(), "Compiling schema");

        let required = self
            .fields
            .iter()
            .filter(|(_, rules)| rules.required == Some(true))
            .map(|(key, _)| validate_obj_has_key(key.as_str()));

        let types = self.fields.iter().filter_map(|(key, rules)| {
            rules
                .type_tag
                .map(|tag| validate_obj_prop_has_type(tag, key.as_str()))
        });

        let custom = self.fields.iter().filter_map(|(key, rules)| {
            rules
                .validator
                .clone()
                .map(|validator| validate_obj_prop_passes(validator, key.as_str()))
        });

        let mut validators = vec![
            Validator::new(validate_is_object),
            all(required),
            all(types),
            all(custom),
        ];

        if mode == CompileMode::ObjectStrict {
            validators.push(validate_obj_only_has_keys(self.keys()));
        }

        validators
    }
}

/// Shape check of a declarative object schema.
///
/// The schema must be an object whose values are rule sets: objects with
/// optional `required` (boolean), `type` (a known type name) and `validator`
/// (function). Stops at the first malformed field.
pub fn validate_as_object_schema(schema: &Value) -> Outcome {
    let Some(fields) = schema.as_object() else {
        return err(NOT_AN_OBJECT);
    };

    fields
        .iter()
        .map(|(key, rules)| match RULE_SET.validate(rules) {
            Outcome::Ok => ok(),
            failed => nested_err(Container::Object, [(key, failed)]),
        })
        .find(Outcome::is_err)
        .unwrap_or_default()
}

/// Shape check of a declarative array schema (a single rule set).
pub fn validate_as_array_schema(schema: &Value) -> Outcome {
    if schema.as_object().is_none() {
        return err(NOT_AN_OBJECT);
    }
    RULE_SET.validate(schema)
}

fn or_schema_error<S>(
    parsed: Result<S, SchemaError>,
    mode: CompileMode,
    compile: impl FnOnce(&S) -> Vec<Validator>,
) -> Vec<Validator> {
    match parsed {
        Ok(schema) => compile(&schema),
        Err(e) => {
            let messages = e.messages();
            warn!(mode = %mode, errors = ?messages, "Invalid schema");
            vec![always_err(messages)]
        }
    }
}

/// Compile a declarative schema in the given mode.
pub fn compile(schema: &Value, mode: CompileMode) -> Vec<Validator> {
    match mode {
        CompileMode::Object => from_object_schema(schema),
        CompileMode::ObjectStrict => from_object_schema_strict(schema),
        CompileMode::Array => from_array_schema(schema),
    }
}

/// Validators for an object schema that allows undeclared fields.
pub fn from_object_schema(schema: &Value) -> Vec<Validator> {
    or_schema_error(ObjectSchema::parse(schema), CompileMode::Object, |s| {
        s.validators()
    })
}

/// Validators for an object schema that rejects undeclared fields.
pub fn from_object_schema_strict(schema: &Value) -> Vec<Validator> {
    or_schema_error(ObjectSchema::parse(schema), CompileMode::ObjectStrict, |s| {
        s.strict_validators()
    })
}

/// Validators for an array whose items follow a single rule set.
pub fn from_array_schema(schema: &Value) -> Vec<Validator> {
    or_schema_error(SchemaRules::parse(schema), CompileMode::Array, |s| {
        s.array_validators()
    })
}

/// Strict object validator that stops at the first failing stage.
pub fn object_validator(schema: &Value) -> Validator {
    all_while_ok(from_object_schema_strict(schema))
}

pub fn array_validator(schema: &Value) -> Validator {
    all_while_ok(from_array_schema(schema))
}

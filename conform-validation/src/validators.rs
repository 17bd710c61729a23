// Built-in validators

use conform_core::{
    Container, Messages, Outcome, TypeTag, Validator, Value, err, is_array, is_object, nested_err,
    ok, to_result,
};

fn type_mismatch(value: &Value, tag: TypeTag) -> Outcome {
    err(format!("{} failed to typecheck (expected {})", value, tag))
}

// Generic validators

/// Always passes.
pub fn always_ok() -> Validator {
    Validator::new(|_| ok())
}

/// Always fails with the given messages.
pub fn always_err(errors: impl Into<Messages>) -> Validator {
    let errors = errors.into();
    Validator::new(move |_| err(errors.clone()))
}

/// Build a validator from a predicate and a message for values that fail it.
pub fn from_predicate<P, M>(test: P, to_error_message: M) -> Validator
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
    M: Fn(&Value) -> String + Send + Sync + 'static,
{
    Validator::new(move |value| {
        if test(value) {
            ok()
        } else {
            err(to_error_message(value))
        }
    })
}

/// Validates that a value has the given type
pub fn validate_is_type(tag: TypeTag) -> Validator {
    Validator::new(move |value| {
        if tag.matches(value) {
            ok()
        } else {
            type_mismatch(value, tag)
        }
    })
}

/// Validates that a value equals one of the allowed values
pub fn validate_is_in(allowed: Vec<Value>) -> Validator {
    Validator::new(move |value| {
        if allowed.contains(value) {
            ok()
        } else {
            let options: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
            err(format!("{} was not one of [{}]", value, options.join(", ")))
        }
    })
}

// Object validators

/// Validates that a value is an object (not null, an array, or a date).
pub fn validate_is_object(value: &Value) -> Outcome {
    if is_object(value) {
        ok()
    } else {
        type_mismatch(value, TypeTag::Object)
    }
}

/// Validates that an object has the given own key
pub fn validate_obj_has_key(key: impl Into<String>) -> Validator {
    let key = key.into();
    Validator::new(move |obj| {
        if obj.has_key(&key) {
            ok()
        } else {
            err(format!("Missing required field \"{}\"", key))
        }
    })
}

/// If the object has the key, validates that its value has the given type.
///
/// Failures nest under the key.
pub fn validate_obj_prop_has_type(tag: TypeTag, key: impl Into<String>) -> Validator {
    let key = key.into();
    Validator::new(move |obj| match obj.get(&key) {
        None => ok(),
        Some(value) if tag.matches(value) => ok(),
        Some(value) => nested_err(Container::Object, [(key.as_str(), type_mismatch(value, tag))]),
    })
}

/// If the object has the key, runs `validator` on its value.
///
/// The nested outcome is attached under the key.
pub fn validate_obj_prop_passes(validator: Validator, key: impl Into<String>) -> Validator {
    let key = key.into();
    Validator::new(move |obj| match obj.get(&key) {
        None => ok(),
        Some(value) => match validator.validate(value) {
            Outcome::Ok => ok(),
            failed => nested_err(Container::Object, [(key.as_str(), failed)]),
        },
    })
}

/// Validates that the object has no keys besides `keys`
pub fn validate_obj_only_has_keys<K, I>(keys: I) -> Validator
where
    K: Into<String>,
    I: IntoIterator<Item = K>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    Validator::new(move |obj| match obj.as_object() {
        None => ok(),
        Some(fields) => to_result(
            fields
                .keys()
                .filter(|k| !keys.iter().any(|allowed| allowed.as_str() == *k))
                .map(|k| format!("Extra field \"{}\"", k))
                .collect(),
        ),
    })
}

// Array validators

/// Validates that a value is an array.
pub fn validate_is_array(value: &Value) -> Outcome {
    if is_array(value) {
        ok()
    } else {
        type_mismatch(value, TypeTag::Array)
    }
}

/// Validates that every item has the given type; failures nest under the index.
pub fn validate_array_items_have_type(tag: TypeTag) -> Validator {
    Validator::new(move |arr| {
        let Some(items) = arr.as_array() else {
            return ok();
        };

        let failures: Vec<(usize, Outcome)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !tag.matches(item))
            .map(|(i, item)| (i, type_mismatch(item, tag)))
            .collect();

        if failures.is_empty() {
            ok()
        } else {
            nested_err(Container::Array, failures)
        }
    })
}

/// Runs `validator` on every item; failures nest under the index.
pub fn validate_array_items_pass(validator: Validator) -> Validator {
    Validator::new(move |arr| {
        let Some(items) = arr.as_array() else {
            return ok();
        };

        let failures: Vec<(usize, Outcome)> = items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, validator.validate(item)))
            .filter(|(_, outcome)| outcome.is_err())
            .collect();

        if failures.is_empty() {
            ok()
        } else {
            nested_err(Container::Array, failures)
        }
    })
}

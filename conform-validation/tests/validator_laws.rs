//! Laws that hold for any input data.

use conform_core::*;
use conform_validation::*;
use proptest::prelude::*;
use serde_json::json;

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (-100i64..100).prop_map(serde_json::Value::from),
        "[a-z0-9-]{0,8}".prop_map(serde_json::Value::from),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

fn validators() -> Vec<Validator> {
    vec![
        Validator::new(validate_is_object),
        validate_obj_has_key("a"),
        validate_obj_prop_has_type(TypeTag::String, "b"),
        validate_obj_only_has_keys(["a", "b"]),
        validate_array_items_have_type(TypeTag::Number),
    ]
}

proptest! {
    #[test]
    fn validation_is_idempotent(input in json_value()) {
        let schema = Value::from(json!({
            "a": { "required": true, "type": "number" },
            "b": { "type": "string" },
            "c": { "type": "date" }
        }));
        let value = Value::from(input);

        let v = object_validator(&schema);
        prop_assert_eq!(v.validate(&value), v.validate(&value));
        prop_assert_eq!(v.validate(&value), object_validator(&schema).validate(&value));
    }

    #[test]
    fn all_is_concat_of_each(input in json_value()) {
        let value = Value::from(input);
        let expected = concat_results(validators().iter().map(|v| v.validate(&value)));
        prop_assert_eq!(all(validators()).validate(&value), expected);
    }

    #[test]
    fn all_while_ok_is_first_failure(input in json_value()) {
        let value = Value::from(input);
        let first = validators()
            .iter()
            .map(|v| v.validate(&value))
            .find(Outcome::is_err)
            .unwrap_or_default();
        prop_assert_eq!(all_while_ok(validators()).validate(&value), first);
    }

    #[test]
    fn some_passes_iff_any_passes(input in json_value()) {
        let value = Value::from(input);
        let any_ok = validators().iter().any(|v| v.validate(&value).is_ok());
        prop_assert_eq!(some(validators()).validate(&value).is_ok(), any_ok);
    }

    #[test]
    fn open_schema_accepts_what_strict_accepts(input in json_value()) {
        let schema = Value::from(json!({ "a": { "type": "string" } }));
        let value = Value::from(input);
        if object_validator(&schema).validate(&value).is_ok() {
            prop_assert!(all_while_ok(from_object_schema(&schema)).validate(&value).is_ok());
        }
    }
}

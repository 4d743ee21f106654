use schematik_addons::{
    BUILTINS, SchematikExt, array, boolean, install, integer, null, number, object, one_of,
    string,
};
use schematik_core::{NULLABLE_FLAG, Schematik, SchematikError};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn test_install_is_idempotent() {
    install();
    install();
    assert!(!Schematik::use_extension(&BUILTINS));
    assert!(Schematik::responds_to("string"));
    assert!(Schematik::responds_to("unique"));
}

#[test]
fn test_unique_on_untyped_builder() {
    install();
    let b = Schematik::new().call("unique", &[]).unwrap();
    assert_eq!(b.schema("uniqueItems"), Some(&json!(true)));
    assert_eq!(b.type_name(), None);
}

#[test]
fn test_modifiers_are_instance_only() {
    install();
    let err = Schematik::call_static("unique", &[]).unwrap_err();
    assert!(matches!(err, SchematikError::UnknownMethod(_)));
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[test]
fn test_type_constructors() {
    assert_eq!(null().unwrap().done(), json!({ "type": "null" }));
    assert_eq!(boolean().unwrap().done(), json!({ "type": "boolean" }));
    assert_eq!(integer().unwrap().done(), json!({ "type": "integer" }));
    assert_eq!(number().unwrap().done(), json!({ "type": "number" }));
    assert_eq!(string().unwrap().done(), json!({ "type": "string" }));
    assert_eq!(array().unwrap().done(), json!({ "type": "array" }));
    assert_eq!(
        object().unwrap().done(),
        json!({ "type": "object", "additionalProperties": true })
    );
}

#[test]
fn test_type_cannot_be_overwritten_through_chain() {
    let err = number().unwrap().call("string", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Overwriting existing type is not allowed.");
}

#[test]
fn test_number_with_range() {
    let b = number()
        .and_then(|b| b.min()?.value(0))
        .and_then(|b| b.max()?.value(100))
        .unwrap();
    assert_eq!(
        b.done(),
        json!({ "type": "number", "minimum": 0, "maximum": 100 })
    );
}

#[test]
fn test_string_rejects_bad_pattern() {
    let err = string().unwrap().matches("[a-").unwrap_err();
    assert!(matches!(err, SchematikError::InvalidParameter { .. }));
}

#[test]
fn test_string_keywords() {
    let email = string()
        .and_then(|b| b.format("email"))
        .and_then(|b| b.min()?.count(3))
        .unwrap();
    assert_eq!(
        email.done(),
        json!({ "type": "string", "format": "email", "minLength": 3 })
    );
}

// ---------------------------------------------------------------------------
// Nesting and nullable
// ---------------------------------------------------------------------------

#[test]
fn test_nested_object() {
    let tags = array()
        .and_then(|b| b.items(&string()?))
        .and_then(|b| b.unique())
        .unwrap();
    let doc = object()
        .and_then(|b| b.required("id", &integer()?))
        .and_then(|b| b.property("tags", &tags))
        .and_then(|b| b.description("A tagged record"))
        .unwrap();

    assert_eq!(
        doc.done(),
        json!({
            "type": "object",
            "additionalProperties": true,
            "description": "A tagged record",
            "properties": {
                "id": { "type": "integer" },
                "tags": { "type": "array", "items": { "type": "string" }, "uniqueItems": true }
            },
            "required": ["id"]
        })
    );
}

#[test]
fn test_nullable_property() {
    let doc = object()
        .and_then(|b| b.property("age", &integer()?.nullable()?))
        .unwrap();

    assert_eq!(
        doc.schema("properties"),
        Some(&json!({
            "age": { "oneOf": [{ "type": "null" }, { "type": "integer" }] }
        }))
    );
}

#[test]
fn test_nullable_flag_does_not_leak() {
    let b = number().and_then(|b| b.nullable()).unwrap();
    assert_eq!(b.flag(NULLABLE_FLAG), Some(&json!(true)));

    let rendered = serde_json::to_string(&b.done()).unwrap();
    assert!(!rendered.contains(NULLABLE_FLAG));
}

#[test]
fn test_one_of_and_enum() {
    let choice = one_of(&[string().unwrap(), null().unwrap()]).unwrap();
    assert_eq!(
        choice.done(),
        json!({ "oneOf": [{ "type": "string" }, { "type": "null" }] })
    );

    let level = string()
        .and_then(|b| b.enum_values(&[json!("low"), json!("high")]))
        .and_then(|b| b.default_value("low"))
        .unwrap();
    assert_eq!(
        level.done(),
        json!({ "type": "string", "enum": ["low", "high"], "default": "low" })
    );
}

#[test]
fn test_one_of_requires_branches() {
    let err = one_of(&[]).unwrap_err();
    assert!(matches!(err, SchematikError::InvalidParameter { .. }));
}

#[test]
fn test_chain_never_mutates_earlier_links() {
    let base = object().unwrap();
    let with_name = base.property("name", &string().unwrap()).unwrap();

    assert_eq!(base.schema("properties"), None);
    assert!(with_name.schema("properties").is_some());
}

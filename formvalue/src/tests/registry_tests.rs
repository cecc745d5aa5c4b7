//! Tests for scalar and native-shaped kinds.
//!
//! Covers the identity-up-to-type-check property for native wire shapes,
//! the rating bounds, and the date-range arity rules.

use proptest::prelude::*;
use serde_json::json;

use crate::error::ErrorCode;
use crate::kind::FieldKind;
use crate::registry::{serialize, Registry};
use crate::value::FieldValue;

fn registry() -> Registry {
    Registry::new()
}

// =============================================================================
// Scalar identity up to type check
// =============================================================================

#[test]
fn test_text_kinds_accept_strings() {
    let registry = registry();
    assert_eq!(
        registry.validate(FieldKind::Text, &json!("hello")).unwrap(),
        FieldValue::Text("hello".into())
    );
    assert_eq!(
        registry.validate(FieldKind::TextArea, &json!("a\nb")).unwrap(),
        FieldValue::TextArea("a\nb".into())
    );
    assert_eq!(
        registry.validate(FieldKind::Editor, &json!("<p>rich</p>")).unwrap(),
        FieldValue::Editor("<p>rich</p>".into())
    );
    assert_eq!(
        registry.validate(FieldKind::Radio, &json!("yes")).unwrap(),
        FieldValue::Radio("yes".into())
    );
    assert_eq!(
        registry.validate(FieldKind::Select, &json!("opt1")).unwrap(),
        FieldValue::Select("opt1".into())
    );
}

#[test]
fn test_text_kinds_reject_other_primitives() {
    let registry = registry();
    for raw in [json!(1), json!(true), json!(null), json!([]), json!({})] {
        let err = registry.validate(FieldKind::Text, &raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ShapeMismatch, "raw = {}", raw);
    }
}

#[test]
fn test_number_accepts_floats_and_integers() {
    let registry = registry();
    assert_eq!(
        registry.validate(FieldKind::Number, &json!(3.25)).unwrap(),
        FieldValue::Number(3.25)
    );
    assert_eq!(
        registry.validate(FieldKind::Number, &json!(42)).unwrap(),
        FieldValue::Number(42.0)
    );
    let err = registry.validate(FieldKind::Number, &json!("42")).unwrap_err();
    assert_eq!(err.code, ErrorCode::ShapeMismatch);
}

#[test]
fn test_string_list_kinds() {
    let registry = registry();
    let raw = json!(["a", "b"]);
    for kind in [
        FieldKind::Checkbox,
        FieldKind::MultiSelect,
        FieldKind::CascadeSelect,
        FieldKind::Employee,
        FieldKind::City,
    ] {
        let value = registry.validate(kind, &raw).unwrap();
        assert_eq!(value.kind(), kind);
    }
    let err = registry
        .validate(FieldKind::Checkbox, &json!(["a", 1]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShapeMismatch);
    assert!(err.message.contains("element 1"));
}

#[test]
fn test_department_select_accepts_string_and_list() {
    let registry = registry();
    assert_eq!(
        registry
            .validate(FieldKind::DepartmentSelect, &json!("dept-1"))
            .unwrap(),
        FieldValue::DepartmentSelect(vec!["dept-1".into()])
    );
    assert_eq!(
        registry
            .validate(FieldKind::DepartmentSelect, &json!(["dept-1", "dept-2"]))
            .unwrap(),
        FieldValue::DepartmentSelect(vec!["dept-1".into(), "dept-2".into()])
    );
    let err = registry
        .validate(FieldKind::DepartmentSelect, &json!(7))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShapeMismatch);
}

// =============================================================================
// Rate bounds
// =============================================================================

#[test]
fn test_rate_boundaries() {
    let registry = registry();
    assert_eq!(
        registry.validate(FieldKind::Rate, &json!(1)).unwrap(),
        FieldValue::Rate(1)
    );
    assert_eq!(
        registry.validate(FieldKind::Rate, &json!(100)).unwrap(),
        FieldValue::Rate(100)
    );
    for raw in [json!(0), json!(101)] {
        let err = registry.validate(FieldKind::Rate, &raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConstraintViolation, "raw = {}", raw);
    }
}

#[test]
fn test_rate_rejects_non_integers_as_shape_errors() {
    let registry = registry();
    for raw in [json!(3.5), json!("50"), json!(true)] {
        let err = registry.validate(FieldKind::Rate, &raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ShapeMismatch, "raw = {}", raw);
    }
}

// =============================================================================
// Timestamps
// =============================================================================

#[test]
fn test_date_accepts_rfc3339() {
    let value = registry()
        .validate(FieldKind::Date, &json!("2024-03-01T10:00:00+08:00"))
        .unwrap();
    match value {
        FieldValue::Date(ts) => assert_eq!(ts.to_rfc3339(), "2024-03-01T10:00:00+08:00"),
        other => panic!("expected a date, got {:?}", other),
    }
}

#[test]
fn test_date_accepts_naive_timestamp_as_utc() {
    let value = registry()
        .validate(FieldKind::Date, &json!("2024-03-01T10:00:00"))
        .unwrap();
    match value {
        FieldValue::Date(ts) => assert_eq!(ts.to_rfc3339(), "2024-03-01T10:00:00+00:00"),
        other => panic!("expected a date, got {:?}", other),
    }
}

#[test]
fn test_date_rejects_garbage() {
    let err = registry()
        .validate(FieldKind::Date, &json!("tomorrow"))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShapeMismatch);
}

#[test]
fn test_cascade_date_requires_exactly_two_elements() {
    let registry = registry();
    let ok = registry
        .validate(
            FieldKind::CascadeDate,
            &json!(["2024-03-01T00:00:00Z", "2024-03-08T00:00:00Z"]),
        )
        .unwrap();
    assert_eq!(ok.kind(), FieldKind::CascadeDate);

    for raw in [
        json!([]),
        json!(["2024-03-01T00:00:00Z"]),
        json!([
            "2024-03-01T00:00:00Z",
            "2024-03-02T00:00:00Z",
            "2024-03-03T00:00:00Z"
        ]),
    ] {
        let err = registry.validate(FieldKind::CascadeDate, &raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ShapeMismatch, "raw = {}", raw);
    }
}

#[test]
fn test_cascade_date_does_not_order_endpoints() {
    // End before start is structurally fine; the schema enforces no ordering.
    let value = registry()
        .validate(
            FieldKind::CascadeDate,
            &json!(["2024-03-08T00:00:00Z", "2024-03-01T00:00:00Z"]),
        )
        .unwrap();
    assert_eq!(value.kind(), FieldKind::CascadeDate);
}

// =============================================================================
// Serialization inverse for native kinds
// =============================================================================

#[test]
fn test_serialize_is_inverse_for_native_kinds() {
    let registry = registry();
    let cases = [
        (FieldKind::Text, json!("hello")),
        (FieldKind::Number, json!(3.25)),
        (FieldKind::Rate, json!(87)),
        (FieldKind::Checkbox, json!(["a", "b"])),
        (FieldKind::Date, json!("2024-03-01T10:00:00+08:00")),
        (
            FieldKind::CascadeDate,
            json!(["2024-03-01T00:00:00+00:00", "2024-03-08T00:00:00+00:00"]),
        ),
    ];
    for (kind, raw) in cases {
        let value = registry.validate(kind, &raw).unwrap();
        assert_eq!(serialize(&value).unwrap(), raw, "kind = {}", kind);
    }
}

#[test]
fn test_department_select_serializes_as_array() {
    let value = registry()
        .validate(FieldKind::DepartmentSelect, &json!("dept-1"))
        .unwrap();
    assert_eq!(serialize(&value).unwrap(), json!(["dept-1"]));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Any string validates as text and round-trips unchanged.
    #[test]
    fn prop_text_identity(s in ".*") {
        let registry = Registry::new();
        let value = registry.validate(FieldKind::Text, &json!(s.clone())).unwrap();
        prop_assert_eq!(value.clone(), FieldValue::Text(s));
        let raw = serialize(&value).unwrap();
        prop_assert_eq!(registry.validate(FieldKind::Text, &raw).unwrap(), value);
    }

    /// Ratings inside [1, 100] validate; outside fail with a constraint error.
    #[test]
    fn prop_rate_bounds(n in -1000i64..1000i64) {
        let registry = Registry::new();
        let result = registry.validate(FieldKind::Rate, &json!(n));
        if (1..=100).contains(&n) {
            prop_assert_eq!(result.unwrap(), FieldValue::Rate(n));
        } else {
            prop_assert_eq!(result.unwrap_err().code, ErrorCode::ConstraintViolation);
        }
    }

    /// Arrays of strings validate for every list-shaped kind and round-trip.
    #[test]
    fn prop_string_list_round_trip(items in prop::collection::vec("[a-z0-9]{0,8}", 0..6)) {
        let registry = Registry::new();
        let raw = json!(items);
        let value = registry.validate(FieldKind::MultiSelect, &raw).unwrap();
        prop_assert_eq!(serialize(&value).unwrap(), raw);
    }
}

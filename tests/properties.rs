use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use shapecheck::{
    DataType, Error, FailureKind, Kind, TypeRef, ValidationError, Validator, check, check_option,
    ensure, equals, every, one_of, optional, passes, validate,
};

fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e6..1.0e6f64).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

#[test]
fn markers_match_classified_type() {
    let samples = [json!("s"), json!(true), json!(1.5), json!({}), json!([]), Value::Null];
    let markers = [Kind::String, Kind::Boolean, Kind::Number, Kind::Object, Kind::Array, Kind::Null];
    for (i, value) in samples.iter().enumerate() {
        for (j, marker) in markers.iter().enumerate() {
            let result = check(value, &(*marker).into());
            if i == j {
                assert!(result.is_ok(), "{value} vs {marker}");
            } else {
                let failure = result.unwrap_err();
                assert_eq!(failure.got(), Some(DataType::of(Some(value))));
                assert_eq!(failure.kind, FailureKind::NativeType { expected: *marker, got: DataType::of(Some(value)) });
            }
        }
    }
}

#[test]
fn object_marker_rejects_falsy_values() {
    for value in [Value::Null, json!(0), json!(""), json!(false)] {
        assert!(!passes(&value, &Kind::Object.into()), "{value}");
        assert!(!passes(&value, &Kind::Array.into()), "{value}");
    }
}

#[test]
fn array_shape_is_vacuous_on_empty() {
    let v = Validator::array(Kind::Number);
    assert!(passes(&json!([]), &v));
    assert!(passes(&json!([1, 2, 3]), &v));
    assert!(!passes(&json!([1, "2"]), &v));
    assert!(!passes(&json!("[1]"), &v));
}

#[test]
fn object_shapes() {
    let v = Validator::object([("a", Validator::from(Kind::Number)), ("b", optional(Kind::Number))]);
    assert!(passes(&json!({"a": 1}), &v));
    let strict = Validator::object([("a", Kind::Number), ("b", Kind::Number)]);
    assert!(!passes(&json!({"a": 1, "b": "x"}), &strict));
}

#[test]
fn strict_unknown_key() {
    let failure = check(&json!({"a": 1, "z": 2}), &Validator::object([("a", Kind::Number)])).unwrap_err();
    assert_eq!(failure.kind, FailureKind::UnknownKey { key: "z".into() });
}

#[test]
fn equals_is_strict() {
    assert!(passes(&json!(5), &equals(5)));
    assert!(!passes(&json!("5"), &equals(5)));
}

#[test]
fn one_of_and_every() {
    let either = one_of([Kind::String, Kind::Number]).unwrap();
    assert!(passes(&json!("x"), &either));
    assert!(passes(&json!(42), &either));
    assert!(!passes(&json!(true), &either));

    let positive = every([
        Validator::from(Kind::Number),
        validate(|v: &Value| v.as_f64().is_some_and(|n| n > 0.0)),
    ])
    .unwrap();
    assert!(passes(&json!(5), &positive));
    assert!(!passes(&json!(-5), &positive));
    assert!(!passes(&json!("5"), &positive));
}

#[test]
fn optional_exempts_only_absence() {
    let v = optional(Kind::String);
    assert!(check_option(None, &v).is_ok());
    assert!(passes(&Value::Null, &v));
    assert!(passes(&json!("x"), &v));
    let failure = check(&json!(42), &v).unwrap_err();
    assert!(failure.optional);
}

#[test]
fn invalid_use_raises_regardless_of_value() {
    for descriptor in [json!(null), json!([]), json!({"$oneOf": "not-an-array"})] {
        assert!(matches!(Validator::from_descriptor(&descriptor), Err(Error::InvalidUse { .. })));
    }
    assert!(one_of(Vec::<Validator>::new()).is_err());
    assert!(every(Vec::<Validator>::new()).is_err());
}

#[test]
fn ensure_raises_with_clue() {
    let err = ensure(&json!(5), &Kind::String.into()).unwrap_err();
    assert!(err.message.contains("string") && err.message.contains("number"), "{}", err.message);
    assert!(ensure(&json!("x"), &Kind::String.into()).is_ok());
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Endpoint {
    host: String,
    port: u16,
}

#[test]
fn typed_instance_check() {
    let v = Validator::object([("primary", Validator::of::<Endpoint>())]);
    assert!(passes(&json!({"primary": {"host": "db", "port": 5432}}), &v));

    let failure = check(&json!({"primary": {"host": "db", "port": 70000}}), &v).unwrap_err();
    let FailureKind::InstanceOf { expected, got, detail } = &failure.kind else {
        panic!("unexpected failure {failure:?}");
    };
    assert_eq!(expected, "Endpoint");
    assert_eq!(*got, DataType::Object);
    assert!(detail.as_deref().is_some_and(|d| d.contains("port")), "{detail:?}");

    let failure = check(&json!({}), &v).unwrap_err();
    assert_eq!(
        failure.kind,
        FailureKind::InstanceOf { expected: "Endpoint".into(), got: DataType::Undefined, detail: None }
    );
    assert_eq!(TypeRef::named::<Endpoint>("Upstream").name(), "Upstream");
}

#[test]
fn custom_validator_composes_with_ensure() {
    let port = Validator::from(Kind::Integer);
    let config = Validator::object([(
        "ports",
        validate(move |v: &Value| -> Result<(), ValidationError> {
            for p in v.as_array().into_iter().flatten() {
                ensure(p, &port)?;
            }
            Ok(())
        }),
    )]);
    let err = ensure(&json!({"ports": [80, "443"]}), &config).unwrap_err();
    assert_eq!(
        err.clue,
        "Custom validator failed for value \"[80,\"443\"]\" for key \"ports\": \"validation failed. Expected integer, got string.\""
    );
}

#[test]
#[should_panic(expected = "boom")]
fn foreign_panics_propagate() {
    let v = validate(|_: &Value| -> bool { panic!("boom") });
    let _ = check(&json!(1), &v);
}

#[test]
fn validators_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Validator>();
}

proptest! {
    #[test]
    fn check_is_deterministic(value in json_value_strategy()) {
        let v = Validator::object([
            ("a", optional(Kind::Number)),
            ("b", optional(Validator::array(one_of([Kind::String, Kind::Null]).unwrap()))),
        ]);
        let first = check(&value, &v);
        let second = check(&value, &v);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn kind_marker_agrees_with_classifier(value in json_value_strategy()) {
        let t = DataType::of(Some(&value));
        for kind in Kind::ALL.into_iter().filter(|k| *k != Kind::Integer) {
            prop_assert_eq!(passes(&value, &kind.into()), kind.as_str() == t.as_str());
        }
    }

    #[test]
    fn array_of_anything_accepts_any_array(items in proptest::collection::vec(json_value_strategy(), 0..6)) {
        let any = one_of(Kind::ALL).unwrap();
        prop_assert!(passes(&Value::Array(items), &Validator::array(any)));
    }
}

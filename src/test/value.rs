use crate::value::{to_value, Value};
use crate::ErrorKind;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn accessors() {
    assert!(Value::Null.is_null());
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Int(7).as_i64(), Some(7));
    assert_eq!(Value::Int(7).as_f64(), Some(7.0));
    assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    assert_eq!(Value::from("hi").as_str(), Some("hi"));
    assert_eq!(Value::Array(vec![Value::Null]).as_array().map(|a| a.len()), Some(1));
    assert!(Value::Int(7).as_str().is_none());
    assert!(Value::Null.as_object().is_none());
}

#[test]
fn conversions() {
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(3i32), Value::Int(3));
    assert_eq!(Value::from(3i64), Value::Int(3));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from("s"), Value::Str("s".to_string()));
    assert_eq!(Value::default(), Value::Null);
}

#[test]
fn to_value_structs() {
    #[derive(Serialize)]
    struct Server {
        name: String,
        port: u16,
        tags: Vec<&'static str>,
        backup: Option<bool>,
    }

    let value = to_value(Server {
        name: "a".to_string(),
        port: 8080,
        tags: vec!["x"],
        backup: None,
    })
    .unwrap();

    let expected = Value::Object(IndexMap::from_iter([
        ("name".to_string(), Value::from("a")),
        ("port".to_string(), Value::Int(8080)),
        ("tags".to_string(), Value::Array(vec![Value::from("x")])),
        ("backup".to_string(), Value::Null),
    ]));
    assert_eq!(value, expected);
}

#[test]
fn to_value_rejects_out_of_range_integers() {
    assert!(matches!(
        to_value(u64::MAX).unwrap_err().kind(),
        ErrorKind::IntegerOutOfRange,
    ));
    assert_eq!(to_value(u64::from(u32::MAX)).unwrap(), Value::Int(4294967295));
}

#[test]
fn to_value_rejects_raw_bytes() {
    assert!(matches!(
        to_value(serde_bytes::Bytes::new(b"raw")).unwrap_err().kind(),
        ErrorKind::UnsupportedType,
    ));
}

#[test]
fn to_value_coerces_integer_keys() {
    let value = to_value(BTreeMap::from_iter([(42i32, "x")])).unwrap();
    assert_eq!(
        value,
        Value::Object(IndexMap::from_iter([("42".to_string(), Value::from("x"))])),
    );
}

#[test]
fn to_value_rejects_non_string_keys() {
    assert!(matches!(
        to_value(BTreeMap::from_iter([(true, 1)])).unwrap_err().kind(),
        ErrorKind::KeyMustBeAString,
    ));
}

#[test]
fn serde_json_interop() {
    let value = serde_json::from_value::<Value>(json!({
        "name": "smile",
        "ok": true,
        "count": 3,
        "ratio": 0.5,
        "items": [1, null],
    }))
    .unwrap();

    let fields = value.as_object().unwrap();
    assert_eq!(fields["name"], Value::from("smile"));
    assert_eq!(fields["ok"], Value::Bool(true));
    assert_eq!(fields["count"], Value::Int(3));
    assert_eq!(fields["ratio"], Value::Float(0.5));
    assert_eq!(
        fields["items"],
        Value::Array(vec![Value::Int(1), Value::Null]),
    );

    assert_eq!(serde_json::to_value(&value).unwrap(), json!({
        "name": "smile",
        "ok": true,
        "count": 3,
        "ratio": 0.5,
        "items": [1, null],
    }));
}

#[test]
fn value_round_trips_through_the_codec() {
    let value = to_value(vec![("pair", 1)]).unwrap();
    let bytes = crate::to_vec(&value).unwrap();
    assert_eq!(crate::from_slice(&bytes).unwrap(), value);
}

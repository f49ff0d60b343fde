use serde::Serialize;
use serde_zoon::{to_string, zoon, Number, ZoonMap, ZoonValue};

#[test]
fn test_zoon_macro_null() {
    let value = zoon!(null);
    assert_eq!(value, ZoonValue::Null);
}

#[test]
fn test_zoon_macro_booleans() {
    assert_eq!(zoon!(true), ZoonValue::Bool(true));
    assert_eq!(zoon!(false), ZoonValue::Bool(false));
}

#[test]
fn test_zoon_macro_numbers() {
    assert_eq!(zoon!(42), ZoonValue::Number(Number::Integer(42)));
    assert_eq!(zoon!(3.5), ZoonValue::Number(Number::Float(3.5)));
    assert_eq!(zoon!(-123), ZoonValue::Number(Number::Integer(-123)));
}

#[test]
fn test_zoon_macro_strings() {
    assert_eq!(
        zoon!("hello world"),
        ZoonValue::String("hello world".to_string())
    );
    assert_eq!(zoon!(""), ZoonValue::String(String::new()));
}

#[test]
fn test_zoon_macro_arrays() {
    assert_eq!(zoon!([]), ZoonValue::Array(vec![]));

    let mixed = zoon!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        ZoonValue::Array(vec![
            ZoonValue::Number(Number::Integer(1)),
            ZoonValue::String("hello".to_string()),
            ZoonValue::Bool(true),
            ZoonValue::Null,
        ])
    );
}

#[test]
fn test_zoon_macro_objects_keep_insertion_order() {
    assert_eq!(zoon!({}), ZoonValue::Object(ZoonMap::new()));

    let user = zoon!({
        "name": "Alice",
        "age": 30,
        "email": null
    });

    let obj = user.as_object().unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["name", "age", "email"]);
    assert_eq!(obj.get("age"), Some(&ZoonValue::from(30)));
    assert_eq!(obj.get("email"), Some(&ZoonValue::Null));
}

#[test]
fn test_zoon_macro_nested() {
    let nested = zoon!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    assert_eq!(nested.pointer("user.id"), Some(&ZoonValue::from(123)));
    assert_eq!(nested.pointer("user.name").and_then(ZoonValue::as_str), Some("Bob"));
    assert_eq!(nested.pointer("user.active").and_then(ZoonValue::as_bool), Some(true));
    assert_eq!(nested.pointer("tags").and_then(ZoonValue::as_array).map(Vec::len), Some(2));
    assert_eq!(nested.pointer("user.missing"), None);
    assert_eq!(nested.pointer("count.deeper"), None);
}

#[test]
fn test_zoon_macro_interpolates_expressions() {
    #[derive(Serialize)]
    struct Port(u16);

    let host = "db.internal";
    let port = Port(5432);
    let retries = 3;

    let value = zoon!({
        "host": host,
        "port": port,
        "retries": retries * 2,
        "offset": -retries
    });

    assert_eq!(value.pointer("host"), Some(&ZoonValue::from("db.internal")));
    assert_eq!(value.pointer("port"), Some(&ZoonValue::from(5432)));
    assert_eq!(value.pointer("retries"), Some(&ZoonValue::from(6)));
    assert_eq!(value.pointer("offset"), Some(&ZoonValue::from(-3)));
}

#[test]
fn test_zoon_value_predicates() {
    let null_val = zoon!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());

    let bool_val = zoon!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = zoon!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let float_val = zoon!(2.5);
    assert!(float_val.is_number());
    assert_eq!(float_val.as_f64(), Some(2.5));
    assert_eq!(float_val.as_i64(), None);

    assert_eq!(zoon!(7).as_f64(), Some(7.0));
    assert_eq!(zoon!([1, 2, 3]).as_array().map(Vec::len), Some(3));
    assert_eq!(zoon!({"key": "value"}).as_object().map(ZoonMap::len), Some(1));
}

#[test]
fn test_kind_names() {
    assert_eq!(zoon!(null).kind_name(), "null");
    assert_eq!(zoon!(1).kind_name(), "integer");
    assert_eq!(zoon!(1.5).kind_name(), "float");
    assert_eq!(zoon!("x").kind_name(), "string");
    assert_eq!(zoon!([]).kind_name(), "array");
    assert_eq!(zoon!({}).kind_name(), "object");
}

#[test]
fn test_try_from_conversions() {
    assert_eq!(i64::try_from(zoon!(9)).unwrap(), 9);
    assert_eq!(f64::try_from(zoon!(9)).unwrap(), 9.0);
    assert!(bool::try_from(zoon!("y")).is_err());
    assert_eq!(String::try_from(zoon!("ok")).unwrap(), "ok");
    assert!(i64::try_from(zoon!(null)).is_err());
}

#[test]
fn test_display_renders_single_token() {
    assert_eq!(zoon!("New York").to_string(), "New_York");
    assert_eq!(zoon!(null).to_string(), "~");
    assert_eq!(zoon!([1, "a b"]).to_string(), "[1 a_b]");
}

#[test]
fn test_macro_values_encode() {
    // Values serialize as maps, so keys come out sorted.
    let doc = zoon!({ "env": "prod", "replicas": 3, "canary": false });
    assert_eq!(to_string(&doc).unwrap(), "canary:n env=prod replicas:3");

    let rows = zoon!([{ "k": "a" }, { "k": "b" }]);
    assert_eq!(to_string(&rows).unwrap(), "# k:s\na\nb\n");
}

use serde_ini_doc::{ini, Container, Document, IniMap, Value};

#[test]
fn test_ini_macro_null() {
    assert_eq!(ini!(null), Value::Null);
}

#[test]
fn test_ini_macro_scalars_are_strings() {
    assert_eq!(ini!(true), Value::from("true"));
    assert_eq!(ini!(false), Value::from("false"));
    assert_eq!(ini!(42), Value::from("42"));
    assert_eq!(ini!(-123), Value::from("-123"));
    assert_eq!(ini!(3.5), Value::from("3.5"));
    assert_eq!(ini!('c'), Value::from("c"));
}

#[test]
fn test_ini_macro_strings() {
    assert_eq!(ini!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(ini!(""), Value::String(String::new()));
}

#[test]
fn test_ini_macro_empty_section() {
    assert_eq!(ini!({}), Value::Section(IniMap::new()));
}

#[test]
fn test_ini_macro_section() {
    let value = ini!({
        "name": "Alice",
        "age": 30,
        "active": true
    });

    let map = value.as_section().unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age", "active"]);
    assert_eq!(value.get("age").and_then(Value::as_str), Some("30"));
}

#[test]
fn test_ini_macro_trailing_comma() {
    let value = ini!({
        "a": 1,
        "b": 2,
    });
    assert_eq!(value.as_section().map(IniMap::len), Some(2));
}

#[test]
fn test_ini_macro_nested_sections() {
    let value = ini!({
        "server": {
            "host": "localhost",
            "tls": { "enabled": true }
        }
    });

    let enabled = value
        .get("server")
        .and_then(|s| s.get("tls"))
        .and_then(|t| t.get("enabled"));
    assert_eq!(enabled, Some(&Value::from("true")));
}

#[test]
fn test_ini_macro_with_expressions() {
    let port = 8080;
    let host = String::from("example.org");
    let value = ini!({
        "port": port,
        "host": host
    });
    assert_eq!(value.get("port"), Some(&Value::from("8080")));
    assert_eq!(value.get("host"), Some(&Value::from("example.org")));
}

#[test]
fn test_ini_macro_to_document() {
    let value = ini!({
        "title": "config",
        "unset": null,
        "database": {
            "user": "admin",
            "pool": { "size": 4 }
        }
    });

    let doc = Document::try_from(value).unwrap();
    assert!(!doc.contains_key("unset"));
    assert_eq!(doc.section_names(true), vec!["database", "database.pool"]);
    assert_eq!(
        doc.to_string(),
        "title=config\n\n[database]\nuser=admin\n\n[database.pool]\nsize=4\n"
    );
}

#[test]
fn test_ini_macro_display() {
    let value = ini!({ "k": "v", "s": { "x": 1 } });
    assert_eq!(value.to_string(), "k=v\n\n[s]\nx=1\n");
    assert_eq!(ini!("plain").to_string(), "plain");
    assert_eq!(ini!(null).to_string(), "");
}

#[test]
fn test_ini_macro_scalar_is_not_a_document() {
    assert!(Document::try_from(ini!("text")).is_err());
    assert!(Document::try_from(ini!(null)).is_err());
}

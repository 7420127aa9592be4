/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become sections, everything else becomes a string. `null`
/// entries are dropped when the value is turned into a document.
///
/// ```rust
/// use serde_ini_doc::{ini, Document};
///
/// let value = ini!({
///     "name": "demo",
///     "debug": false,
///     "server": { "host": "localhost", "port": 8080 },
///     "unused": null
/// });
///
/// let doc = Document::try_from(value).unwrap();
/// assert_eq!(
///     doc.to_string(),
///     "name=demo\ndebug=false\n\n[server]\nhost=localhost\nport=8080\n"
/// );
/// ```
#[macro_export]
macro_rules! ini {
    (null) => {
        $crate::Value::Null
    };

    ({}) => {
        $crate::Value::Section($crate::IniMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut section = $crate::IniMap::new();
        $(
            section.insert($key.to_string(), $crate::ini!($value));
        )*
        $crate::Value::Section(section)
    }};

    // Any other expression goes through the serializer; sequences become null.
    ($e:expr) => {
        $crate::to_value(&$e).unwrap_or_default()
    };
}

#[cfg(test)]
mod tests {
    use crate::{IniMap, Value};

    #[test]
    fn test_ini_macro_scalars() {
        assert_eq!(ini!(null), Value::Null);
        assert_eq!(ini!(true), Value::from("true"));
        assert_eq!(ini!(42), Value::from("42"));
        assert_eq!(ini!(-1.5), Value::from("-1.5"));
        assert_eq!(ini!("hello"), Value::from("hello"));
    }

    #[test]
    fn test_ini_macro_sections() {
        assert_eq!(ini!({}), Value::Section(IniMap::new()));

        let value = ini!({
            "name": "Alice",
            "limits": { "cpu": 2 }
        });
        assert_eq!(value.get("name"), Some(&Value::from("Alice")));
        assert_eq!(
            value.get("limits").and_then(|v| v.get("cpu")),
            Some(&Value::from("2"))
        );
    }

    #[test]
    fn test_ini_macro_unsupported_is_null() {
        assert_eq!(ini!(vec![1, 2]), Value::Null);
    }
}

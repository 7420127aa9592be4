//! Property-based tests for the guarantees the document model makes:
//! escaped values read back unchanged, rendering is stable across a
//! parse/render cycle, and order and nesting survive edits.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ini_doc::escape::escape_value;
use serde_ini_doc::{from_str, parse, to_string, Container, Document, Entry};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ;#=\\\\\n\r\t.,é\\[\\]]{0,30}"
        .prop_filter("values are stored without surrounding spaces", |v| {
            v.trim_matches(' ') == v
        })
}

/// Keys with spaces and tabs at either edge, which address the trimmed key.
fn padded_key() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[a-z][a-z0-9_-]{0,8}[ \t]{0,2}"
}

fn section_name() -> impl Strategy<Value = String> {
    "[a-z]{1,5}(\\.[a-z]{1,5}){0,2}"
}

fn field_comment() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z][a-z ]{0,10}[a-z]")
}

type Field = (String, String, Option<String>);

fn fields() -> impl Strategy<Value = Vec<Field>> {
    prop::collection::vec((padded_key(), value(), field_comment()), 0..6)
}

fn fill<C: Container + ?Sized>(container: &mut C, fields: &[Field]) {
    for (key, value, comment) in fields {
        container.set(key, value);
        if let Some(comment) = comment {
            container.set_field_comment(key, comment);
        }
    }
}

fn document() -> impl Strategy<Value = Document> {
    (
        fields(),
        prop::collection::vec((section_name(), fields()), 0..4),
    )
        .prop_map(|(root, sections)| {
            let mut doc = Document::new();
            fill(&mut doc, &root);
            for (name, body) in sections {
                fill(&mut doc.section(&name), &body);
            }
            doc
        })
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Limits {
    cpu: u16,
    memory: u64,
    ratio: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Service {
    name: String,
    enabled: bool,
    retries: i8,
    limits: Limits,
}

fn service() -> impl Strategy<Value = Service> {
    (
        "[a-zA-Z0-9 ;#.]{0,20}".prop_filter("trimmed", |s| s.trim_matches(' ') == s),
        any::<bool>(),
        any::<i8>(),
        any::<u16>(),
        any::<u64>(),
        any::<i32>(),
    )
        .prop_map(|(name, enabled, retries, cpu, memory, ratio)| Service {
            name,
            enabled,
            retries,
            limits: Limits { cpu, memory, ratio },
        })
}

proptest! {
    #[test]
    fn prop_escaped_value_reads_back(v in value()) {
        let doc = parse(&format!("key={}", escape_value(&v)));
        prop_assert_eq!(doc.get("key"), v.as_str());
    }

    #[test]
    fn prop_escaped_value_with_comment_reads_back(v in value(), c in "[a-z][a-z ]{0,10}[a-z]") {
        let doc = parse(&format!("key={} ; {}\n", escape_value(&v), c));
        prop_assert_eq!(doc.get("key"), v.as_str());
        prop_assert_eq!(doc.get_comment("key"), c.as_str());
    }

    #[test]
    fn prop_padded_key_reads_back(k in padded_key(), v in value()) {
        let mut doc = Document::new();
        doc.set(&k, &v);
        let trimmed = k.trim_matches(|c| c == ' ' || c == '\t');
        prop_assert_eq!(doc.keys(), vec![trimmed]);

        let reparsed = parse(&doc.to_string());
        prop_assert_eq!(reparsed.get(&k), v.as_str());
        prop_assert_eq!(reparsed.get(trimmed), v.as_str());
        prop_assert_eq!(reparsed.keys(), vec![trimmed]);
    }

    #[test]
    fn prop_render_is_stable(doc in document()) {
        let first = doc.to_string();
        let reparsed = parse(&first);
        prop_assert_eq!(reparsed.to_string(), first);
    }

    #[test]
    fn prop_parse_keeps_values(doc in document()) {
        let reparsed = parse(&doc.to_string());
        prop_assert_eq!(reparsed.values(), doc.values());
        for section in doc.sections().filter(|s| !s.entries().is_empty()) {
            let other = reparsed.get_section(section.name());
            prop_assert!(other.is_some(), "missing section {}", section.name());
            prop_assert_eq!(other.map(|s| s.values()), Some(section.values()));
        }
    }

    #[test]
    fn prop_strip_white_lines_is_idempotent(doc in document()) {
        let mut once = parse(&doc.to_string());
        once.strip_white_lines();
        prop_assert!(!once.entries().iter().any(Entry::is_blank_line));
        prop_assert!(once
            .sections()
            .all(|s| !s.entries().iter().any(Entry::is_blank_line)));

        let mut twice = once.clone();
        twice.strip_white_lines();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_keys_keep_first_insertion_order(keys in prop::collection::vec(key(), 0..12)) {
        let mut doc = Document::new();
        let mut expected: Vec<&str> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            doc.set_uint(key, i as u64);
            if !expected.contains(&key.as_str()) {
                expected.push(key);
            }
        }
        prop_assert_eq!(doc.keys(), expected);
    }

    #[test]
    fn prop_section_creates_every_ancestor(name in section_name()) {
        let mut doc = Document::new();
        doc.section(&name);
        let names = doc.section_names(true);
        for (pos, _) in name.match_indices('.') {
            prop_assert!(names.contains(&&name[..pos]));
        }
        prop_assert_eq!(names.last().copied(), Some(name.as_str()));
    }

    #[test]
    fn prop_parser_accepts_any_input(text in any::<String>()) {
        let doc = parse(&text);
        let rendered = doc.to_string();
        prop_assert!(rendered.is_empty() || rendered.ends_with('\n'));
    }

    #[test]
    fn prop_record_roundtrip(s in service()) {
        prop_assert!(roundtrip(&s));
    }
}

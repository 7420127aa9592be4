//! Reading, editing and writing an INI document without losing comments.
//!
//! Run with: cargo run --example document_editing

use serde_ini_doc::{Container, Document};
use std::error::Error;

const INPUT: &str = "\
; Service configuration
name=billing
debug=false ; flip for verbose logs

# Primary database
[database]
host=db.internal
port=5432

[database.replica]
host=10.0.0.2
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = Document::parse(INPUT);
    assert_eq!(doc.to_string(), INPUT);
    println!("✓ Unmodified document renders byte for byte\n");

    let db = doc.get_section("database").ok_or("missing [database]")?;
    println!("database port: {}", db.get_int("port")?);
    println!("database comment: {}", db.comment());

    doc.set_bool("debug", true);
    let mut replica = doc.section("database").into_section("replica");
    replica.set_uint("port", 5433);
    replica.set_field_comment("port", "read only");

    doc.section("cache").set("ttl", "30s");
    doc.section("cache").add_comment("seconds or minutes");

    println!("\nSections: {:?}", doc.section_names(true));
    println!(
        "Below database: {:?}",
        doc.section("database").subsection_names(true)
    );

    println!("\nEdited document:\n{}", doc);

    doc.remove_section("database");
    doc.strip_white_lines();
    println!("Without database and blank lines:\n{}", doc);

    Ok(())
}

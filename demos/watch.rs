//! Keeping a document in sync with a file on disk.
//!
//! Run with: cargo run --example watch --features watch

use serde_ini_doc::{watch, Container, Document};
use std::error::Error;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("serde_ini_doc_watch_demo.ini");

    let mut doc = Document::new();
    doc.set("level", "info");
    doc.save(&path)?;

    let watched = watch(&path)?;
    println!("level = {}", watched.read().get("level"));

    for level in ["debug", "trace", "warn"] {
        let mut edited = watched.snapshot();
        edited.set("level", level);
        edited.save(&path)?;

        thread::sleep(Duration::from_millis(300));
        println!("level = {}", watched.read().get("level"));
    }

    watched.unwatch();
    std::fs::remove_file(&path)?;
    Ok(())
}

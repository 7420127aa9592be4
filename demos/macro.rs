//! Building INI values with the ini! macro.
//!
//! Run with: cargo run --example macro

use serde_ini_doc::{ini, Document};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let replicas = 3;

    let value = ini!({
        "name": "orders",
        "debug": false,
        "retired": null,
        "server": {
            "host": "0.0.0.0",
            "port": 8080,
            "tls": { "cert": "/etc/tls/cert.pem" }
        },
        "database": {
            "replicas": replicas
        }
    });

    println!("As INI:\n{}", value);

    let doc = Document::try_from(value)?;
    println!("Sections: {:?}", doc.section_names(true));

    Ok(())
}

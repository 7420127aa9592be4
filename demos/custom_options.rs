//! Customizing INI output with IniOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_ini_doc::{parse_with_options, to_string_with_options, IniOptions, Marker};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    server: Server,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        server: Server {
            host: "localhost".to_string(),
            port: 8080,
        },
    };

    println!("Default:");
    println!("{}", serde_ini_doc::to_string(&config)?);

    println!("Compact (no blank lines):");
    println!("{}", to_string_with_options(&config, &IniOptions::compact())?);

    let text = "a=1 ; first\n\n\nb=2 ; second\n\n[s]\nc=3\n";

    println!("Hash inline comments:");
    let hash = IniOptions::new().with_field_comment_marker(Marker::Hash);
    println!("{}", parse_with_options(text, &hash).render(&hash));

    println!("Blank lines dropped while parsing:");
    let dense = IniOptions::new().with_white_lines(false);
    println!("{}", parse_with_options(text, &dense).render(&dense));

    Ok(())
}

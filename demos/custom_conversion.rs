//! Hand-written layouts with ToIni and FromIni.
//!
//! Run with: cargo run --example custom_conversion

use serde::{Deserialize, Serialize};
use serde_ini_doc::custom::{self, FromIni, ToIni};
use serde_ini_doc::{Container, Document, Error, Result};

/// Stored as a single `address=host:port` key.
#[derive(Debug, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
}

impl ToIni for Endpoint {
    fn to_ini(&self, doc: &mut Document) -> Result<()> {
        doc.set("address", &format!("{}:{}", self.host, self.port));
        Ok(())
    }
}

impl FromIni for Endpoint {
    fn from_ini(doc: &Document) -> Result<Self> {
        let address = doc.get("address");
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| Error::conversion("address", address, "host:port", "missing `:`"))?;
        let port = port
            .parse()
            .map_err(|e| Error::conversion("address", address, "host:port", e))?;
        Ok(Endpoint {
            host: host.to_string(),
            port,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    #[serde(with = "serde_ini_doc::custom")]
    primary: Endpoint,
    #[serde(with = "serde_ini_doc::custom")]
    fallback: Endpoint,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let endpoint = Endpoint {
        host: "localhost".to_string(),
        port: 8080,
    };
    let text = custom::to_string(&endpoint)?;
    println!("Standalone:\n{}", text);
    assert_eq!(custom::from_str::<Endpoint>(&text)?, endpoint);

    let config = Config {
        name: "proxy".to_string(),
        primary: endpoint,
        fallback: Endpoint {
            host: "10.0.0.9".to_string(),
            port: 9090,
        },
    };
    let text = serde_ini_doc::to_string(&config)?;
    println!("Inside a record:\n{}", text);

    let back: Config = serde_ini_doc::from_str(&text)?;
    assert_eq!(back, config);
    println!("✓ Round-trip successful");

    match custom::from_str::<Endpoint>("address=nowhere\n") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("\nInvalid input: {}", err),
    }

    Ok(())
}

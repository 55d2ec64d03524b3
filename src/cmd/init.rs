//! `xcms-bridge init` — generate a starter configuration file.
//!
//! Creates a YAML, JSON, or TOML config file with either minimal
//! or fully documented templates.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::BridgeError;

pub fn execute(args: &InitArgs) -> Result<(), BridgeError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("xcms-bridge.{}", args.format.extension())));

    if output.exists() {
        return Err(BridgeError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# xcms-bridge config

backend:
  host: "localhost"
  port: 9001
"#;

const YAML_FULL: &str = r#"# xcms-bridge config
#
# All values shown are defaults. Every section is optional.

# Where the front door listens
listen:
  host: "0.0.0.0"
  port: 5000

# The XCMS service every /api/xcms/* request is forwarded to
backend:
  host: "localhost"
  port: 9001

# Backend call timeout in milliseconds (connect + response)
timeout: 5000

# Max inbound request body size in bytes
max_body: 1048576

# Used by `xcms-bridge tunnel localtunnel`
tunnel:
  subdomain: "xcms-monitor"
"#;

const JSON_MINIMAL: &str = r#"{
  "backend": {
    "host": "localhost",
    "port": 9001
  }
}
"#;

const JSON_FULL: &str = r#"{
  "listen": {
    "host": "0.0.0.0",
    "port": 5000
  },
  "backend": {
    "host": "localhost",
    "port": 9001
  },
  "timeout": 5000,
  "max_body": 1048576,
  "tunnel": {
    "subdomain": "xcms-monitor"
  }
}
"#;

const TOML_MINIMAL: &str = r#"# xcms-bridge config

[backend]
host = "localhost"
port = 9001
"#;

const TOML_FULL: &str = r#"# xcms-bridge config
#
# All values shown are defaults. Every section is optional.

# Backend call timeout in milliseconds (connect + response)
timeout = 5000

# Max inbound request body size in bytes
max_body = 1048576

# Where the front door listens
[listen]
host = "0.0.0.0"
port = 5000

# The XCMS service every /api/xcms/* request is forwarded to
[backend]
host = "localhost"
port = 9001

# Used by `xcms-bridge tunnel localtunnel`
[tunnel]
subdomain = "xcms-monitor"
"#;

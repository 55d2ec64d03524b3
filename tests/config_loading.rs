//! Integration tests for config loading across all file formats.

use xcms_bridge::cli::ConfigFormat;
use xcms_bridge::cmd::init::template;
use xcms_bridge::config::model::{BackendTarget, Config};
use xcms_bridge::config::parse_config_str;
use xcms_bridge::config::validation::validate;

#[cfg(feature = "yaml")]
#[test]
fn yaml_templates_load_and_validate() {
    for full in [false, true] {
        let config = parse_config_str("yaml", template(&ConfigFormat::Yaml, full), "t.yaml").unwrap();
        validate(&config).unwrap();
        assert_eq!(config, Config::default());
    }
}

#[cfg(feature = "json")]
#[test]
fn json_templates_load_and_validate() {
    for full in [false, true] {
        let config = parse_config_str("json", template(&ConfigFormat::Json, full), "t.json").unwrap();
        validate(&config).unwrap();
        assert_eq!(config, Config::default());
    }
}

#[cfg(feature = "toml")]
#[test]
fn toml_templates_load_and_validate() {
    for full in [false, true] {
        let config = parse_config_str("toml", template(&ConfigFormat::Toml, full), "t.toml").unwrap();
        validate(&config).unwrap();
        assert_eq!(config, Config::default());
    }
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_overrides_backend() {
    let content = "backend:\n  host: 192.168.1.184\n  port: 9101\ntimeout: 3000\n";
    let config = parse_config_str("yml", content, "bridge.yml").unwrap();
    assert_eq!(config.backend, BackendTarget::new("192.168.1.184", 9101));
    assert_eq!(config.timeout, 3000);
    assert_eq!(config.listen.port, 5000);
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_unknown_field_is_a_parse_error() {
    let result = parse_config_str("yaml", "routes: []\n", "bridge.yaml");
    assert!(result.is_err());
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "<config/>", "test.xml");
    assert!(result.is_err());
}

#[test]
fn invalid_config_fails_validation() {
    let config: Config = serde_json::from_str(r#"{"backend": {"host": "http://xcms"}}"#).unwrap();
    assert!(validate(&config).is_err());
}

//! `xcms-bridge validate` — check a configuration file without starting.
//!
//! Reads the file through the same loader `run` uses, then prints either
//! the text report or a JSON document for scripts. A failed check exits
//! non-zero through [`BridgeError::ConfigValidation`].

use std::path::Path;

use serde::Serialize;

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::model::Config;
use crate::config::{self, validation};
use crate::error::{BridgeError, ValidationError};

/// Effective settings of a valid file, as printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub listen: String,
    pub backend: String,
    pub timeout: u64,
    pub max_body: usize,
    pub subdomain: String,
}

impl From<&Config> for ConfigSummary {
    fn from(config: &Config) -> Self {
        Self {
            listen: format!("{}:{}", config.listen.host, config.listen.port),
            backend: config.backend.to_string(),
            timeout: config.timeout,
            max_body: config.max_body,
            subdomain: config.tunnel.subdomain.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub valid: bool,
    #[serde(flatten)]
    pub summary: Option<ConfigSummary>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub errors: &'a [ValidationError],
}

pub async fn execute(args: &ValidateArgs) -> Result<(), BridgeError> {
    let path = args.config.as_path();
    let config = config::load_file(path).await?;

    match validation::validate(&config) {
        Ok(()) => {
            match args.format {
                ValidateFormat::Text => println!("\u{2713} {}", text_report(path, &config)),
                ValidateFormat::Json => println!("{}", json_report(Ok(&config))),
            }
            Ok(())
        }
        Err(errors) => {
            match args.format {
                ValidateFormat::Text => {
                    eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                    for error in &errors {
                        eprintln!("{error}");
                    }
                }
                ValidateFormat::Json => println!("{}", json_report(Err(errors.as_slice()))),
            }
            Err(BridgeError::ConfigValidation { errors })
        }
    }
}

fn text_report(path: &Path, config: &Config) -> String {
    validation::format_validation_report(&path.display().to_string(), config)
}

#[must_use]
pub fn json_report(result: Result<&Config, &[ValidationError]>) -> serde_json::Value {
    let report = match result {
        Ok(config) => JsonReport {
            valid: true,
            summary: Some(ConfigSummary::from(config)),
            errors: &[],
        },
        Err(errors) => JsonReport {
            valid: false,
            summary: None,
            errors,
        },
    };
    serde_json::to_value(report).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_report_has_every_setting() {
        let report = json_report(Ok(&Config::default()));
        assert_eq!(
            report,
            serde_json::json!({
                "valid": true,
                "listen": "0.0.0.0:5000",
                "backend": "localhost:9001",
                "timeout": 5000,
                "max_body": 1_048_576,
                "subdomain": "xcms-monitor",
            })
        );
    }

    #[test]
    fn invalid_report_lists_errors() {
        let mut config = Config::default();
        config.backend.host = "http://xcms".into();
        let errors = validation::validate(&config).unwrap_err();

        let report = json_report(Err(errors.as_slice()));
        assert_eq!(report["valid"], false);
        assert!(report.get("backend").is_none());
        assert_eq!(report["errors"][0]["section"], "backend");
        assert_eq!(report["errors"][0]["suggestion"], "did you mean 'xcms'?");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let args = ValidateArgs {
            config: "/nonexistent/xcms-bridge.yaml".into(),
            format: ValidateFormat::Json,
        };
        let err = execute(&args).await.unwrap_err();
        assert!(matches!(err, BridgeError::ConfigFileNotFound { .. }));
    }
}

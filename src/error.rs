//! Unified error types for the bridge.
//!
//! [`BridgeError`] covers process-level failures (config loading, CLI
//! subcommands, tunnel processes). [`ForwardError`] is the single failure
//! kind of the forwarder: every variant ends up as the same HTTP 500
//! envelope, the variants only shape the message. [`ValidationError`]
//! describes one config validation problem.

use std::path::PathBuf;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationError {
    pub section: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}.{}: {}", self.section, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),

    #[error("'{program}' was not found on PATH.\n\n  {hint}")]
    TunnelToolMissing {
        program: &'static str,
        hint: &'static str,
    },

    #[error("'{program}' exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    TunnelExited {
        program: &'static str,
        code: Option<i32>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("failed to build backend request: {0}")]
    Request(#[source] http::Error),

    #[error("backend request failed: {0}")]
    Connect(#[source] hyper_util::client::legacy::Error),

    #[error("backend request timed out after {0}ms")]
    Timeout(u64),

    #[error("failed to read backend response: {0}")]
    Body(#[source] hyper::Error),

    #[error("backend returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_suggestion() {
        let err = ValidationError {
            section: "backend".into(),
            field: "host".into(),
            message: "must not include a scheme".into(),
            suggestion: Some("use 'localhost'".into()),
        };
        assert_eq!(
            err.to_string(),
            "  backend.host: must not include a scheme (use 'localhost')"
        );
    }

    #[test]
    fn config_validation_lists_every_error() {
        let err = BridgeError::ConfigValidation {
            errors: vec![
                ValidationError {
                    section: "backend".into(),
                    field: "port".into(),
                    message: "port must be non-zero".into(),
                    suggestion: None,
                },
                ValidationError {
                    section: "(root)".into(),
                    field: "timeout".into(),
                    message: "timeout must be greater than 0".into(),
                    suggestion: None,
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("backend.port"));
        assert!(text.contains("(root).timeout"));
    }

    #[test]
    fn timeout_message_is_not_empty() {
        assert_eq!(
            ForwardError::Timeout(5000).to_string(),
            "backend request timed out after 5000ms"
        );
    }

    #[test]
    fn tunnel_exit_message_mentions_status() {
        let err = BridgeError::TunnelExited {
            program: "lt",
            code: Some(2),
        };
        assert_eq!(err.to_string(), "'lt' exited with status 2");
    }
}

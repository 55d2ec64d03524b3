//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for values that
//! would only fail later at bind or forward time: malformed backend hosts,
//! zero ports, zero timeouts and bad tunnel subdomains. Returns every
//! problem found as a list of [`ValidationError`] values.

use url::Url;

use super::model::{BackendTarget, Config};
use crate::error::ValidationError;

/// Validate a backend host. Returns `Ok(())` or a human-readable error.
pub fn validate_backend_host(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("host cannot be empty".into());
    }
    if host.contains("://") {
        return Err("host must not include a scheme".into());
    }
    if host.contains('/') {
        return Err("host must not include a path".into());
    }
    if host.chars().any(char::is_whitespace) {
        return Err("host must not contain whitespace".into());
    }
    if host.contains('@') {
        return Err("host must not include credentials".into());
    }
    if host.matches(':').count() == 1 {
        return Err("host must not include a port".into());
    }
    Ok(())
}

/// A likely fix for a rejected or unparsable backend host.
fn backend_host_suggestion(host: &str) -> Option<String> {
    if let Some((_, rest)) = host.split_once("://") {
        let bare = rest.split('/').next().unwrap_or(rest);
        return (!bare.is_empty()).then(|| format!("did you mean '{bare}'?"));
    }
    if let Some((_, bare)) = host.rsplit_once('@') {
        return (!bare.is_empty()).then(|| format!("did you mean '{bare}'?"));
    }
    match host.split_once(':') {
        Some((bare, port)) if !port.contains(':') => Some(format!(
            "set host to '{bare}' and backend.port to {port}"
        )),
        Some(_) if !host.starts_with('[') => {
            Some(format!("wrap IPv6 addresses in brackets: '[{host}]'"))
        }
        _ => None,
    }
}

/// Check that the backend forms a valid `http://host:port` base URL.
pub fn validate_backend_url(backend: &BackendTarget) -> Result<(), String> {
    let base = backend.base_url();
    match Url::parse(&base) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(()),
        _ => Err(format!("'{base}' is not a valid URL")),
    }
}

/// Validate a localtunnel subdomain. Returns `Ok(())` or a human-readable error.
pub fn validate_subdomain(subdomain: &str) -> Result<(), String> {
    if subdomain.is_empty() {
        return Err("subdomain cannot be empty".into());
    }
    if !subdomain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(format!(
            "'{subdomain}' may only contain ASCII letters, digits and '-'"
        ));
    }
    Ok(())
}

fn error(section: &str, field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        section: section.into(),
        field: field.into(),
        message: message.into(),
        suggestion: None,
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen.host.trim().is_empty() {
        errors.push(ValidationError {
            suggestion: Some("use '0.0.0.0' to listen on all interfaces".into()),
            ..error("listen", "host", "host cannot be empty")
        });
    }
    if config.listen.port == 0 {
        errors.push(error("listen", "port", "port must be non-zero"));
    }

    let backend = &config.backend;
    if let Err(msg) =
        validate_backend_host(&backend.host).and_then(|()| validate_backend_url(backend))
    {
        errors.push(ValidationError {
            suggestion: backend_host_suggestion(&backend.host),
            ..error("backend", "host", msg)
        });
    }
    if backend.port == 0 {
        errors.push(error("backend", "port", "port must be non-zero"));
    }

    if config.timeout == 0 {
        errors.push(error("(root)", "timeout", "timeout must be greater than 0"));
    }
    if config.max_body == 0 {
        errors.push(error("(root)", "max_body", "max_body must be greater than 0"));
    }

    if let Err(msg) = validate_subdomain(&config.tunnel.subdomain) {
        errors.push(error("tunnel", "subdomain", msg));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let lines = [
        format!("  listen:    {}:{}", config.listen.host, config.listen.port),
        format!("  backend:   {}", config.backend.base_url()),
        format!("  timeout:   {}ms", config.timeout),
        format!("  max body:  {} bytes", config.max_body),
        format!("  subdomain: {}", config.tunnel.subdomain),
    ];
    format!("{} is valid\n{}", path, lines.join("\n"))
}

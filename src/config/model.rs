//! Serde data structures for the bridge configuration file.
//!
//! Contains [`Config`] (the root), [`ListenConfig`], [`BackendTarget`] and
//! [`TunnelConfig`]. Every field has a default, so an empty document is a
//! valid configuration. All types use `deny_unknown_fields`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 5000;
pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_PORT: u16 = 9001;
pub const DEFAULT_SUBDOMAIN: &str = "xcms-monitor";

const fn default_timeout() -> u64 {
    5000
}

const fn default_max_body() -> usize {
    1_048_576
}

fn is_default_timeout(v: &u64) -> bool {
    *v == default_timeout()
}

fn is_default_max_body(v: &usize) -> bool {
    *v == default_max_body()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,

    #[serde(default)]
    pub backend: BackendTarget,

    /// Backend call timeout in milliseconds.
    #[serde(
        default = "default_timeout",
        skip_serializing_if = "is_default_timeout"
    )]
    pub timeout: u64,

    /// Max inbound request body size in bytes.
    #[serde(
        default = "default_max_body",
        skip_serializing_if = "is_default_max_body"
    )]
    pub max_body: usize,

    #[serde(default, skip_serializing_if = "TunnelConfig::is_default")]
    pub tunnel: TunnelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            backend: BackendTarget::default(),
            timeout: default_timeout(),
            max_body: default_max_body(),
            tunnel: TunnelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LISTEN_HOST.to_string(),
            port: DEFAULT_LISTEN_PORT,
        }
    }
}

/// The single downstream service every proxied request goes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct BackendTarget {
    pub host: String,
    pub port: u16,
}

impl Default for BackendTarget {
    fn default() -> Self {
        Self {
            host: DEFAULT_BACKEND_HOST.to_string(),
            port: DEFAULT_BACKEND_PORT,
        }
    }
}

impl BackendTarget {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{self}")
    }

    /// Target URL for a sub-path, with the query string appended verbatim.
    #[must_use]
    pub fn url_for(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("http://{self}/{path}?{q}"),
            _ => format!("http://{self}/{path}"),
        }
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct TunnelConfig {
    /// Requested localtunnel subdomain.
    pub subdomain: String,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            subdomain: DEFAULT_SUBDOMAIN.to_string(),
        }
    }
}

impl TunnelConfig {
    fn is_default(&self) -> bool {
        self.subdomain == DEFAULT_SUBDOMAIN
    }
}

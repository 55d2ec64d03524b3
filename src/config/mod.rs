//! Configuration loading and validation.
//!
//! [`load`] resolves the config file (explicit path, auto-detected file in
//! the working directory, or built-in defaults), parses it by extension with
//! [`parse_config_str`]. Validation is left to the caller so that CLI and
//! environment overrides are applied first. The loaded [`Config`] is built
//! once at startup and handed to the server by value.

pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::BridgeError;
use model::Config;

pub const AUTO_DETECT_CANDIDATES: &[&str] = &[
    "xcms-bridge.yaml",
    "xcms-bridge.yml",
    "xcms-bridge.json",
    "xcms-bridge.toml",
];

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("defaults"),
        }
    }
}

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, BridgeError> {
    // An empty file is a valid config: every field has a default.
    if content.trim().is_empty() && is_supported_extension(ext) {
        return Ok(Config::default());
    }

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| BridgeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| BridgeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| BridgeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(BridgeError::UnsupportedFormat(other.to_string())),
    }
}

fn is_supported_extension(ext: &str) -> bool {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => true,
        #[cfg(feature = "json")]
        "json" => true,
        #[cfg(feature = "toml")]
        "toml" => true,
        _ => false,
    }
}

/// Read and parse a config file. The result is not validated.
pub async fn load_file(path: &Path) -> Result<Config, BridgeError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BridgeError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BridgeError::Io(e)
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    parse_config_str(ext, &content, &path.display().to_string())
}

/// Resolve the configuration for `run` and `tunnel`.
///
/// An explicit path must exist. Without one, the first auto-detect
/// candidate present in the working directory is used, falling back to
/// built-in defaults.
pub async fn load(explicit: Option<&Path>) -> Result<(Config, ConfigOrigin), BridgeError> {
    if let Some(path) = explicit {
        let config = load_file(path).await?;
        return Ok((config, ConfigOrigin::File(path.to_path_buf())));
    }

    for name in AUTO_DETECT_CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            let config = load_file(&path).await?;
            return Ok((config, ConfigOrigin::File(path)));
        }
    }

    Ok((Config::default(), ConfigOrigin::Defaults))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_default_config() {
        let config = parse_config_str("json", "  \n", "empty.json");
        #[cfg(feature = "json")]
        assert_eq!(config.unwrap(), Config::default());
        #[cfg(not(feature = "json"))]
        assert!(config.is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = parse_config_str("ini", "", "bridge.ini").unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[tokio::test]
    async fn missing_explicit_file_is_reported() {
        let err = load(Some(Path::new("/nonexistent/xcms-bridge.yaml")))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ConfigFileNotFound { .. }));
    }

    #[cfg(feature = "yaml")]
    #[tokio::test]
    async fn load_file_does_not_validate() {
        let path = std::env::temp_dir().join(format!("xcms-bridge-{}.yaml", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "timeout: 0\n").await.unwrap();

        let config = load_file(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(config.unwrap().timeout, 0);
    }

    #[test]
    fn origin_display() {
        assert_eq!(ConfigOrigin::Defaults.to_string(), "defaults");
        assert_eq!(
            ConfigOrigin::File(PathBuf::from("xcms-bridge.toml")).to_string(),
            "xcms-bridge.toml"
        );
    }
}

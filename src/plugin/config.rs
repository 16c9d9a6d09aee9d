//! Plugin configuration, read once from the host's `ext` JSON string.
//!
//! Recognized keys: `server`, `proxy`, `pan_priority`, `tokens`. A payload
//! that isn't a JSON object falls back to defaults; plugin load never fails.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::backend::client::DEFAULT_BASE_URL;
use crate::search::PanPriority;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ext JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ext must be a JSON object")]
    NotAnObject,

    #[error("invalid server URL '{0}': must be http(s)")]
    InvalidServer(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    server: Option<String>,
    proxy: Option<String>,
    pan_priority: Option<String>,
    tokens: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    /// Backend root without a trailing `/`.
    pub base_url: String,
    pub proxy: Option<String>,
    pub pan_priority: PanPriority,
    /// Reserved for drive credentials; the search pipeline doesn't read it.
    pub tokens: Map<String, Value>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            pan_priority: PanPriority::default(),
            tokens: Map::new(),
        }
    }
}

impl PluginConfig {
    /// Lenient entry point for the host: any error yields the defaults.
    pub fn load(ext: Option<&str>) -> Self {
        match ext.map(Self::from_ext).transpose() {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "ignoring plugin ext, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_ext(ext: &str) -> Result<Self, ConfigError> {
        if ext.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(ext)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let raw: RawConfig = serde_json::from_value(value)?;

        let base_url = match raw.server {
            Some(server) => normalize_server(&server).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring server override");
                DEFAULT_BASE_URL.to_string()
            }),
            None => DEFAULT_BASE_URL.to_string(),
        };

        Ok(Self {
            base_url,
            proxy: raw
                .proxy
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            pan_priority: raw
                .pan_priority
                .as_deref()
                .map(PanPriority::from_csv)
                .unwrap_or_default(),
            tokens: raw.tokens.unwrap_or_default(),
        })
    }
}

fn normalize_server(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BASE_URL.to_string());
    }

    let parsed =
        url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidServer(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidServer(trimmed.to_string())),
    }
}

use std::path::Path;

use logicforge::error::{ErrorSource, Result};
use logicforge::io::read_to_string;
use serde::{Deserialize, Serialize};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Settings of the [`Gemini`](crate::Gemini) gateway.
///
/// Loadable from TOML; every field except the key has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Falls back to the `API_KEY` environment variable when loaded from a file.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub endpoint: String,
    /// Request timeout in seconds; [`None`] waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// The default configuration with the key read from `API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: key_from_env(),
            ..Default::default()
        }
    }

    /// Parses a TOML configuration.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)
            .map_err(|e| ErrorSource::Config(format!("invalid gateway config: {e}")))?;
        Ok(cfg)
    }

    /// Reads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_to_string(path)?;
        let mut cfg = Self::from_toml(&text)?;
        if cfg.api_key.is_none() {
            cfg.api_key = key_from_env();
        }
        Ok(cfg)
    }

    /// The `generateContent` URL of the configured model.
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// The configured key, if it is non-empty.
    pub fn key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

fn key_from_env() -> Option<String> {
    std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty())
}

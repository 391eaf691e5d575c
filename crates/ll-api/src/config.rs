//! API server configuration.
//!
//! Two layers:
//! - [`ApiConfig`]: listen address, storage and cache settings (environment).
//! - [`AiConfig`]: analysis provider credentials and prompt settings (TOML file).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use ll_log_tools::{DEFAULT_LANGUAGE, DEFAULT_LOG_KIND, DEFAULT_PERSONA};

/// Marker left in the sample AI config file until an operator fills in a key.
pub const PLACEHOLDER_KEY_MARKER: &str = "YOUR_API_KEY";

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection URL. None selects the in-memory store.
    pub database_url: Option<String>,
    /// Lifetime of a cached log copy.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Maximum number of cached logs.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Path of the AI provider TOML file.
    #[serde(default = "default_ai_config_path")]
    pub ai_config_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_cache_capacity() -> usize {
    1024
}

fn default_ai_config_path() -> String {
    "config/ai.toml".to_string()
}

impl ApiConfig {
    /// Load config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").ok(),
            cache_ttl_secs: env_parse("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            cache_capacity: env_parse("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            ai_config_path: std::env::var("AI_CONFIG_PATH").unwrap_or(defaults.ai_config_path),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            ai_config_path: default_ai_config_path(),
        }
    }
}

/// Errors loading the AI config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AI config file not found: {0}")]
    NotFound(String),

    #[error("failed to read AI config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid AI config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Analysis provider settings, loaded from a TOML file.
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// Provider credential, sent as the `key` query parameter.
    pub api_key: String,
    /// Model identifier, e.g. "gemini-2.0-flash".
    #[serde(default = "default_model")]
    pub model: String,
    /// Provider base URL (no trailing path).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound on a single analysis call, applied at the call site.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Language the analysis must be written in.
    #[serde(default = "default_language")]
    pub language: String,
    /// Role the analyzer is asked to play.
    #[serde(default = "default_persona")]
    pub persona: String,
    /// Kind of log being analyzed, as named in the prompt.
    #[serde(default = "default_log_kind")]
    pub log_kind: String,
    /// Include credential length/prefix in failure messages. Operator-only.
    #[serde(default)]
    pub key_diagnostics: bool,
}

fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.into()
}
fn default_persona() -> String {
    DEFAULT_PERSONA.into()
}
fn default_log_kind() -> String {
    DEFAULT_LOG_KIND.into()
}

impl AiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(display.clone())
            } else {
                ConfigError::Io {
                    path: display.clone(),
                    source: e,
                }
            }
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Trimmed credential, or None if it is empty or still the placeholder.
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() || key.contains(PLACEHOLDER_KEY_MARKER) {
            None
        } else {
            Some(key)
        }
    }

    /// Credential fragment for failure messages, if enabled.
    pub fn credential_hint(&self) -> Option<CredentialHint> {
        if !self.key_diagnostics {
            return None;
        }
        Some(CredentialHint::new(self.api_key.trim()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .field("persona", &self.persona)
            .field("log_kind", &self.log_kind)
            .field("key_diagnostics", &self.key_diagnostics)
            .finish()
    }
}

/// Length and short prefix of a credential, for operator debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHint {
    pub length: usize,
    pub prefix: String,
}

impl CredentialHint {
    pub fn new(credential: &str) -> Self {
        Self {
            length: credential.chars().count(),
            prefix: credential.chars().take(4).collect(),
        }
    }
}

impl fmt::Display for CredentialHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Key Length: {}, Key Prefix: {}***]",
            self.length, self.prefix
        )
    }
}

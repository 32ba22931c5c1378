//! Application configuration types.
//!
//! Deserialized from `{data_dir}/config.toml` by `marketeer-infra`. Every
//! field has a default so a missing or partial file still yields a working
//! local setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which request/response shape the completion backend speaks.
///
/// One client serves both shapes; the mode selects the extraction path and
/// the default timeout. This replaces per-backend client implementations
/// with a tagged configuration variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Local inference server (Ollama-style chat API). Generated text lives
    /// at `message.content`. Slow local models get a generous timeout.
    LocalChat,
    /// Hosted generation API with bearer auth. Generated text lives at
    /// `output.text`.
    HostedGenerate,
}

impl BackendMode {
    /// Default request timeout for this mode.
    pub fn default_timeout(&self) -> Duration {
        match self {
            BackendMode::LocalChat => Duration::from_secs(60),
            BackendMode::HostedGenerate => Duration::from_secs(30),
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendMode::LocalChat => write!(f, "local_chat"),
            BackendMode::HostedGenerate => write!(f, "hosted_generate"),
        }
    }
}

impl FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local_chat" => Ok(BackendMode::LocalChat),
            "hosted_generate" => Ok(BackendMode::HostedGenerate),
            other => Err(format!("invalid backend mode: '{other}'")),
        }
    }
}

/// Completion backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_mode")]
    pub mode: BackendMode,
    /// Full endpoint URL the request is POSTed to.
    #[serde(default = "default_url")]
    pub url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer key for hosted backends. Unused in `local_chat` mode.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override the mode's default timeout, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Effective request timeout: explicit override or the mode default.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.mode.default_timeout())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            url: default_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

fn default_mode() -> BackendMode {
    BackendMode::LocalChat
}

fn default_url() -> String {
    "http://localhost:11434/api/chat".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Auth-session lifetime in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

fn default_session_ttl_hours() -> u64 {
    24 * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_local_ollama() {
        let config = AppConfig::default();
        assert_eq!(config.backend.mode, BackendMode::LocalChat);
        assert_eq!(config.backend.url, "http://localhost:11434/api/chat");
        assert_eq!(config.backend.timeout(), Duration::from_secs(60));
        assert!(config.backend.api_key.is_none());
    }

    #[test]
    fn test_hosted_mode_has_shorter_timeout() {
        assert_eq!(
            BackendMode::HostedGenerate.default_timeout(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_timeout_override_wins() {
        let config = BackendConfig {
            timeout_secs: Some(5),
            ..BackendConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[backend]
mode = "hosted_generate"
url = "https://api.example.com/v1/generate"
api_key = "sk-test"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.mode, BackendMode::HostedGenerate);
        assert_eq!(config.backend.model, "llama3.2");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.session_ttl_hours, 168);
    }

    #[test]
    fn test_backend_mode_roundtrip() {
        for mode in [BackendMode::LocalChat, BackendMode::HostedGenerate] {
            let s = mode.to_string();
            let parsed: BackendMode = s.parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn test_empty_toml_is_fully_defaulted() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.model, "llama3.2");
        assert_eq!(config.session_ttl_hours, 168);
    }
}

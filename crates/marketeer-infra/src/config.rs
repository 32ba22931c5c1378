//! Configuration and data-directory resolution.
//!
//! Reads `config.toml` from the data directory (`~/.marketeer/` in
//! production, overridable via `MARKETEER_DATA_DIR`) and deserializes it
//! into [`AppConfig`]. Falls back to defaults when the file is missing or
//! malformed, so a fresh checkout runs against a local Ollama with zero
//! setup.

use std::path::{Path, PathBuf};

use marketeer_types::config::AppConfig;

/// Resolve the data directory holding the database and config file.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MARKETEER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".marketeer")
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketeer_types::config::BackendMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.backend.mode, BackendMode::LocalChat);
        assert_eq!(config.backend.url, "http://localhost:11434/api/chat");
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
session_ttl_hours = 48

[backend]
mode = "hosted_generate"
url = "https://api.example.com/v1/generate"
model = "qwen-plus"
api_key = "sk-test"
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.backend.mode, BackendMode::HostedGenerate);
        assert_eq!(config.backend.model, "qwen-plus");
        assert_eq!(config.session_ttl_hours, 48);
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.backend.mode, BackendMode::LocalChat);
    }

    #[test]
    fn resolve_data_dir_honors_env_override() {
        // Serialized env mutation is fine here: this is the only test in the
        // crate touching MARKETEER_DATA_DIR.
        unsafe { std::env::set_var("MARKETEER_DATA_DIR", "/tmp/marketeer-test") };
        let dir = resolve_data_dir();
        unsafe { std::env::remove_var("MARKETEER_DATA_DIR") };
        assert_eq!(dir, PathBuf::from("/tmp/marketeer-test"));
    }
}

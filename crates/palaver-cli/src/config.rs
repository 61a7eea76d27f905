//! Configuration loading from file and environment variables.

use palaver_room::RoomConfig;
use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration for the headless playground.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Process backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// LiveKit deployment settings.
    #[serde(default)]
    pub livekit: LiveKitSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Process backend configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the process-template backend. Empty disables the catalog.
    #[serde(default)]
    pub base_url: String,

    /// Bearer token for the backend. Empty disables the catalog.
    #[serde(default)]
    pub jwt_token: String,
}

/// LiveKit connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveKitSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "palaver_session=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LiveKitSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LiveKitSettings {
    /// The room-service configuration these settings describe.
    pub fn room_config(&self) -> RoomConfig {
        let mut config = RoomConfig::new(&self.url, &self.api_key, &self.api_secret);
        config.token_ttl_seconds = self.token_ttl_seconds;
        config
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PALAVER_BACKEND_URL` overrides `backend.base_url`
/// - `PALAVER_JWT_TOKEN` overrides `backend.jwt_token`
/// - `PALAVER_LIVEKIT_URL` overrides `livekit.url`
/// - `PALAVER_LIVEKIT_API_KEY` overrides `livekit.api_key`
/// - `PALAVER_LIVEKIT_API_SECRET` overrides `livekit.api_secret`
/// - `PALAVER_LOG_LEVEL` overrides `logging.level`
/// - `PALAVER_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(base_url) = std::env::var("PALAVER_BACKEND_URL") {
        config.backend.base_url = base_url;
    }
    if let Ok(jwt) = std::env::var("PALAVER_JWT_TOKEN") {
        config.backend.jwt_token = jwt;
    }
    if let Ok(lk_url) = std::env::var("PALAVER_LIVEKIT_URL") {
        config.livekit.url = lk_url;
    }
    if let Ok(key) = std::env::var("PALAVER_LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Ok(secret) = std::env::var("PALAVER_LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }
    if let Ok(level) = std::env::var("PALAVER_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("PALAVER_LOG_JSON") {
        config.logging.json = json == "true";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_path_given() {
        let config = load_config(None).unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.backend.base_url.is_empty());
        assert_eq!(config.livekit.token_ttl_seconds, 3600);
    }

    #[test]
    fn reads_a_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "https://eva.example"
jwt_token = "t1"

[livekit]
url = "wss://lk.example"
api_key = "devkey"
api_secret = "devsecret"
token_ttl_seconds = 600

[logging]
level = "debug"
json = true
"#
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.backend.base_url, "https://eva.example");
        assert_eq!(config.backend.jwt_token, "t1");
        assert_eq!(config.livekit.url, "wss://lk.example");
        assert_eq!(config.livekit.token_ttl_seconds, 600);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        let room = config.livekit.room_config();
        assert_eq!(room.url, "wss://lk.example");
        assert_eq!(room.token_ttl_seconds, 600);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some("/nonexistent/palaver.toml")).unwrap();
        assert!(config.backend.base_url.is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [[").unwrap();
        assert!(matches!(
            load_config(file.path().to_str()),
            Err(ConfigError::Parse(_))
        ));
    }
}

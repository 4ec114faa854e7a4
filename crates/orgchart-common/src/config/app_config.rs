//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).
//! Empty values are treated the same as unset ones.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub matrix: MatrixConfig,
    pub presence: PresenceConfig,
    pub events: EventBusConfig,
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration. Only the web client's origin is allowed.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_client_url")]
    pub client_url: String,
}

/// Chat homeserver connection settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixConfig {
    pub homeserver_url: Option<String>,
    pub access_token: Option<String>,
    /// Bot account the access token belongs to
    pub user_id: Option<String>,
}

impl MatrixConfig {
    /// Presence is only enabled when both the homeserver URL and the token are set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.homeserver_url.is_some() && self.access_token.is_some()
    }
}

/// Presence polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl PresenceConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Event bus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventBusConfig {
    /// Per-topic buffer size before slow subscribers start lagging
    #[serde(default = "default_event_bus_capacity")]
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_bus_capacity(),
        }
    }
}

/// In-memory store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_seed_data")]
    pub seed_data: bool,
}

// Default value functions
fn default_app_name() -> String {
    "orgchart-server".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_client_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_event_bus_capacity() -> usize {
    256
}

fn default_seed_data() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let env = match var("APP_ENV") {
            Some(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(default_host),
                port: parse_or("PORT", var("PORT"), default_port)?,
            },
            cors: CorsConfig {
                client_url: var("CLIENT_URL").unwrap_or_else(default_client_url),
            },
            matrix: MatrixConfig {
                homeserver_url: var("MATRIX_HOMESERVER_URL"),
                access_token: var("MATRIX_ACCESS_TOKEN"),
                user_id: var("MATRIX_USER_ID"),
            },
            presence: PresenceConfig {
                poll_interval_secs: parse_or(
                    "PRESENCE_POLL_INTERVAL_SECS",
                    var("PRESENCE_POLL_INTERVAL_SECS"),
                    default_poll_interval_secs,
                )?,
            },
            events: EventBusConfig {
                capacity: parse_or(
                    "EVENT_BUS_CAPACITY",
                    var("EVENT_BUS_CAPACITY"),
                    default_event_bus_capacity,
                )?,
            },
            store: StoreConfig {
                seed_data: parse_or("SEED_DATA", var("SEED_DATA"), default_seed_data)?,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app.name, "orgchart-server");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.server.address(), "0.0.0.0:4000");
        assert_eq!(config.cors.client_url, "http://localhost:5173");
        assert_eq!(config.presence.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.events.capacity, 256);
        assert!(config.store.seed_data);
        assert!(!config.matrix.is_configured());
    }

    #[test]
    fn test_matrix_requires_url_and_token() {
        let config = config_from(&[("MATRIX_HOMESERVER_URL", "https://matrix.example.com")]).unwrap();
        assert!(!config.matrix.is_configured());

        let config = config_from(&[
            ("MATRIX_HOMESERVER_URL", "https://matrix.example.com"),
            ("MATRIX_ACCESS_TOKEN", "syt_token"),
        ])
        .unwrap();
        assert!(config.matrix.is_configured());
        assert!(config.matrix.user_id.is_none());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let config = config_from(&[
            ("MATRIX_HOMESERVER_URL", "https://matrix.example.com"),
            ("MATRIX_ACCESS_TOKEN", ""),
            ("PORT", ""),
        ])
        .unwrap();
        assert!(!config.matrix.is_configured());
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("APP_ENV", "Production"),
            ("PORT", "8080"),
            ("PRESENCE_POLL_INTERVAL_SECS", "5"),
            ("SEED_DATA", "false"),
        ])
        .unwrap();
        assert!(config.app.env.is_production());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.presence.poll_interval_secs, 5);
        assert!(!config.store.seed_data);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORT", ref v) if v == "eighty"));
    }

    #[test]
    fn test_invalid_environment_is_rejected() {
        assert!(matches!(
            config_from(&[("APP_ENV", "qa")]),
            Err(ConfigError::InvalidValue("APP_ENV", _))
        ));
    }
}

//! API configuration

use std::time::Duration;

use infra_db::DatabaseConfig;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit one JSON object per log line instead of the human format
    pub log_json: bool,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long a request waits for a pooled connection
    pub acquire_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/guarantees".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    ///
    /// Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("min_connections", i64::from(defaults.min_connections))?
            .set_default("acquire_timeout_secs", defaults.acquire_timeout_secs as i64)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Like [`ApiConfig::from_env`], falling back to the plain variables
    /// (`DATABASE_URL`, `RUST_LOG`) and defaults when the prefixed ones do not
    /// parse
    ///
    /// The parse error is handed back rather than logged, since tracing is
    /// configured from the result.
    pub fn load() -> (Self, Option<config::ConfigError>) {
        let (mut config, error) = Self::or_defaults(Self::from_env());
        if std::env::var("API_DATABASE_URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                config.database_url = url;
            }
        }
        if std::env::var("API_LOG_LEVEL").is_err() {
            if let Ok(level) = std::env::var("RUST_LOG") {
                config.log_level = level;
            }
        }
        (config, error)
    }

    fn or_defaults(
        loaded: Result<Self, config::ConfigError>,
    ) -> (Self, Option<config::ConfigError>) {
        match loaded {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for this configuration
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..ApiConfig::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_database_config_carries_pool_limits() {
        let config = ApiConfig {
            max_connections: 4,
            min_connections: 1,
            acquire_timeout_secs: 5,
            ..ApiConfig::default()
        };
        let db = config.database();
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.acquire_timeout, Duration::from_secs(5));
        assert_eq!(db.url, "postgres://localhost/guarantees");
    }

    #[test]
    fn test_unparseable_environment_falls_back_with_error() {
        let broken = config::Config::builder()
            .set_override("port", "not-a-port")
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize::<ApiConfig>());

        let (config, error) = ApiConfig::or_defaults(broken);
        assert!(error.is_some());
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parsed_environment_carries_no_error() {
        let loaded = ApiConfig { port: 3000, ..ApiConfig::default() };
        let (config, error) = ApiConfig::or_defaults(Ok(loaded));
        assert!(error.is_none());
        assert_eq!(config.port, 3000);
    }
}

//! API configuration

use serde::Deserialize;

use core_kernel::RoundingConvention;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Backing store for the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local; contents are lost on restart
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageBackend,
    /// Rounding applied to the reported general total
    pub rounding: RoundingConvention,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/water_billing".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            storage: StorageBackend::Postgres,
            rounding: RoundingConvention::HalfEven,
            db_max_connections: 10,
            db_min_connections: 2,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("storage", "postgres")?
            .set_default("rounding", "half_even")?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .set_default("db_min_connections", i64::from(defaults.db_min_connections))?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.rounding, RoundingConvention::HalfEven);
    }

    #[test]
    fn test_deserialize_from_strings() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "host": "127.0.0.1",
            "port": 3000,
            "database_url": "postgres://db/billing",
            "log_level": "debug",
            "log_format": "json",
            "storage": "memory",
            "rounding": "half_away_from_zero",
            "db_max_connections": 4,
            "db_min_connections": 1
        }))
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.rounding, RoundingConvention::HalfAwayFromZero);
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }
}

use dashmap::DashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

use crate::error::{GridError, Result};

pub const HOST_KEY: &str = "GRIDSOURCE_HOST";
pub const PORT_KEY: &str = "GRIDSOURCE_PORT";
pub const DATA_KEY: &str = "GRIDSOURCE_DATA";
pub const LOG_FORMAT_KEY: &str = "GRIDSOURCE_LOG_FORMAT";

/// Key/value configuration source
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the process environment.
    pub fn from_env() -> Self {
        let service = Self::new();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON product catalog to serve instead of the built-in one.
    pub data_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let defaults = Self::default();

        let port = match config.get(PORT_KEY) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| GridError::Config(format!("{} must be a port number, got '{}'", PORT_KEY, raw)))?,
            None => defaults.port,
        };

        let log_format = match config.get(LOG_FORMAT_KEY) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|_| {
                GridError::Config(format!("{} must be 'pretty' or 'json', got '{}'", LOG_FORMAT_KEY, raw))
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: config.get(HOST_KEY).unwrap_or(defaults.host),
            port,
            data_path: config.get(DATA_KEY).filter(|p| !p.is_empty()).map(PathBuf::from),
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_config(&ConfigService::new()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let service = ConfigService::new();
        service.set(HOST_KEY, "127.0.0.1");
        service.set(PORT_KEY, "8080");
        service.set(DATA_KEY, "/srv/products.json");
        service.set(LOG_FORMAT_KEY, "JSON");

        let config = ServerConfig::from_config(&service).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/products.json")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let service = ConfigService::new();
        service.set(PORT_KEY, "eighty");
        assert!(matches!(ServerConfig::from_config(&service), Err(GridError::Config(_))));

        let service = ConfigService::new();
        service.set(LOG_FORMAT_KEY, "xml");
        assert!(matches!(ServerConfig::from_config(&service), Err(GridError::Config(_))));
    }
}

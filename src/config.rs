//! Service configuration.
//!
//! Loaded from a TOML file whose path comes from `IMAGE_CONVERTER_CONFIG`
//! (default `config.toml`), then a few environment overrides are applied.

use serde::Deserialize;

use crate::utils::{ConverterError, ConverterResult};

pub const CONFIG_PATH_ENV: &str = "IMAGE_CONVERTER_CONFIG";
pub const PORT_ENV: &str = "IMAGE_CONVERTER_PORT";
pub const WORKERS_ENV: &str = "IMAGE_CONVERTER_WORKERS";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub processing: ProcessingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, in MiB
    pub body_limit_mb: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Concurrent transforms per process; `None` = available cores
    pub workers: Option<usize>,
    /// Per-file transform timeout; `None` = no timeout
    pub file_timeout_secs: Option<u64>,
    /// libvips internal thread count, 0 lets libvips decide
    pub vips_concurrency: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_mb: 50,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: None,
            file_timeout_secs: None,
            vips_concurrency: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            processing: ProcessingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string())
    }

    /// Applies `IMAGE_CONVERTER_PORT` / `IMAGE_CONVERTER_WORKERS` on top of the file values.
    pub fn apply_env_overrides(mut self) -> ConverterResult<Self> {
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|_| ConverterError::config(format!("{PORT_ENV} is not a port: {port}")))?;
        }
        if let Ok(workers) = std::env::var(WORKERS_ENV) {
            let workers = workers.parse().map_err(|_| {
                ConverterError::config(format!("{WORKERS_ENV} is not a number: {workers}"))
            })?;
            self.processing.workers = Some(workers);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConverterResult<()> {
        if self.server.port == 0 {
            return Err(ConverterError::config("server.port cannot be 0"));
        }
        if self.server.body_limit_mb == 0 {
            return Err(ConverterError::config("server.body_limit_mb cannot be 0"));
        }
        if self.processing.workers == Some(0) {
            return Err(ConverterError::config("processing.workers cannot be 0"));
        }
        if self.processing.file_timeout_secs == Some(0) {
            return Err(ConverterError::config("processing.file_timeout_secs cannot be 0"));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [processing]
            workers = 2
            file_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.body_limit_mb, 50);
        assert_eq!(config.processing.workers, Some(2));
        assert_eq!(config.processing.file_timeout_secs, Some(30));
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_zero_values() {
        assert!(Config::from_toml("[server]\nport = 0").is_err());
        assert!(Config::from_toml("[processing]\nworkers = 0").is_err());
        assert!(Config::from_toml("[server]\nbody_limit_mb = 0").is_err());
    }

    #[test]
    fn out_of_range_values_are_config_errors() {
        let mut config = Config::default();
        config.processing.file_timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(ConverterError::Config(_))));
    }

    #[test]
    fn body_limit_in_bytes() {
        assert_eq!(Config::default().body_limit_bytes(), 50 * 1024 * 1024);
    }
}

use std::env;
use std::net::IpAddr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed twice in the same process.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the Quote Keeper server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the HTTP listener binds to.
    pub server_host: IpAddr,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Optional path that receives a copy of the log stream.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: IpAddr::from([0, 0, 0, 0]),
            server_port: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Ok(Self {
            server_host: load("SERVER_HOST")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_HOST".into()))
                })
                .transpose()?
                .unwrap_or(defaults.server_host),
            server_port: load("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            log_file: load("QUOTEKEEPER_LOG_FILE"),
        })
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, or `None` before [`init_config`] has run.
pub fn get_config() -> Option<&'static Config> {
    CONFIG.get()
}

/// Load configuration from the environment (and `.env`) and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    install(&CONFIG, Config::from_env()?)
}

fn install(
    cell: &'static OnceLock<Config>,
    config: Config,
) -> Result<&'static Config, ConfigError> {
    let mut installed = false;
    let stored = cell.get_or_init(|| {
        installed = true;
        config
    });
    if installed {
        Ok(stored)
    } else {
        Err(ConfigError::AlreadyInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn defaults_bind_all_interfaces_without_port() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_host.to_string(), "0.0.0.0");
        assert!(config.server_port.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn parses_host_port_and_log_file() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", " 8080 "),
            ("QUOTEKEEPER_LOG_FILE", "/tmp/quotekeeper.log"),
        ]))
        .unwrap();

        assert_eq!(config.server_host.to_string(), "127.0.0.1");
        assert_eq!(config.server_port, Some(8080));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/quotekeeper.log"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_HOST", "  "),
            ("SERVER_PORT", ""),
        ]))
        .unwrap();

        assert_eq!(config.server_host.to_string(), "0.0.0.0");
        assert!(config.server_port.is_none());
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "SERVER_PORT"));

        let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "SERVER_PORT"));

        let err = Config::from_lookup(lookup_from(&[("SERVER_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "SERVER_HOST"));
    }

    #[test]
    fn install_rejects_second_config() {
        static CELL: OnceLock<Config> = OnceLock::new();
        assert!(CELL.get().is_none());

        let first = install(&CELL, Config::default()).unwrap();
        assert!(first.server_port.is_none());

        let second = Config {
            server_port: Some(9000),
            ..Config::default()
        };
        assert!(matches!(
            install(&CELL, second),
            Err(ConfigError::AlreadyInitialized)
        ));
        assert!(CELL.get().unwrap().server_port.is_none());
    }
}

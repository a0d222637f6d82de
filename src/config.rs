// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AppError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixed artificial delay before responding, in milliseconds. Purely
    /// illustrative of a slow search for UI testing.
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Optional JSON file overriding the built-in result fixture
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DEEP_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                delay_ms: 3000,
            },
            search: SearchConfig { fixture_path: None },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AppError::Config("server host must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.delay_ms, 3000);
        assert!(config.search.fixture_path.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\ndelay_ms = 50\n\n[search]\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.delay_ms, 50);
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = Config::default_config();
        config.server.host.clear();

        assert!(config.validate().is_err());
    }
}

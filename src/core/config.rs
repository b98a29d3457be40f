use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "STAC_CONFIG";

/// Settings shared by readers and writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            user_agent: format!("stac-rs/{}", env!("CARGO_PKG_VERSION")),
            pretty: true,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, then `$STAC_CONFIG`, then defaults.
    ///
    /// An explicit path must exist. A path from the environment is skipped when missing.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(Error::config_invalid_value(
                "http_timeout_secs",
                Some("0".to_string()),
                "timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

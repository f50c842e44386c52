use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,

    #[serde(default = "default_retention_hours")]
    pub retention_hours: u64,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trend-feed");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("news.db").to_string_lossy().to_string()
}

fn default_port() -> u16 {
    5051
}

fn default_sweep_interval() -> u64 {
    15
}

fn default_retention_hours() -> u64 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            port: default_port(),
            sweep_interval_minutes: default_sweep_interval(),
            retention_hours: default_retention_hours(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        // Deployment environments override the listen port without touching
        // the config file.
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {port}")))?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trend-feed")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.port, 5051);
        assert_eq!(config.sweep_interval_minutes, 15);
        assert_eq!(config.retention_hours, 24);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.retention_hours, 24);
    }
}

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{SttConfig, SttError};
use crate::ports::ConfigStore;

/// TOML-based configuration store with OS-specific paths.
pub struct TomlConfigStore {
    data_dir: PathBuf,
}

impl TomlConfigStore {
    /// Create a new TomlConfigStore rooted at the OS config directory
    /// (`~/Library/Application Support`, `%APPDATA%`, `~/.config`).
    pub fn new() -> Result<Self, SttError> {
        let data_dir = dirs::config_dir()
            .map(|p| p.join("Murmur"))
            .ok_or_else(|| {
                SttError::Config("Could not find application data directory".to_string())
            })?;

        fs::create_dir_all(&data_dir)?;

        info!(data_dir = ?data_dir, "ConfigStore initialized");

        Ok(Self { data_dir })
    }

    /// Store rooted at an explicit directory.
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<SttConfig, SttError> {
        let config_path = self.config_path();

        if config_path.exists() {
            debug!(path = ?config_path, "Loading configuration");
            let content = fs::read_to_string(&config_path)?;
            let config: SttConfig = toml::from_str(&content)?;
            info!(path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!(path = ?config_path, "Configuration file not found, creating default");
            let config = SttConfig::new();
            self.save(&config)?;
            Ok(config)
        }
    }

    fn save(&self, config: &SttConfig) -> Result<(), SttError> {
        let config_path = self.config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&config_path, content)?;

        info!(path = ?config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn logs_dir(&self) -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("Murmur").join("logs"))
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}

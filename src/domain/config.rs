use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::WhisperModel;

/// Engine-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model variant to load by default.
    pub model: WhisperModel,
    /// Language tag passed to the decoder (ISO 639-1, e.g. "en").
    pub language: String,
    /// Offload computation to the GPU.
    pub use_gpu: bool,
    /// Enable the flash-attention code path.
    pub flash_attention: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: WhisperModel::Base,
            language: "en".to_string(),
            use_gpu: false,
            flash_attention: true,
        }
    }
}

/// Model storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding downloaded model files.
    /// None selects the OS application-data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
        }
    }
}

/// Top-level configuration for the crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SttConfig {
    pub engine: EngineConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl SttConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SttConfig::new();
        assert_eq!(config.engine.model, WhisperModel::Base);
        assert_eq!(config.engine.language, "en");
        assert!(!config.engine.use_gpu);
        assert!(config.engine.flash_attention);
        assert!(config.storage.models_dir.is_none());
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let config: SttConfig = toml::from_str(
            r#"
            [engine]
            language = "de"
            use_gpu = true
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.language, "de");
        assert!(config.engine.use_gpu);
        assert_eq!(config.logging.level, "info");
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors for Murmur.
#[derive(Error, Debug)]
pub enum SttError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Could not resolve model storage directory: {0}")]
    FolderResolution(String),

    #[error("Model download failed: {0}")]
    Download(String),

    #[error("Failed to move {from:?} into {to:?}: {cause}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        cause: String,
    },

    #[error("Model file missing after a successful download: {0:?}")]
    FileMissingAfterDownload(PathBuf),

    #[error("Audio produced no usable samples")]
    SamplesInvalid,

    #[error("No model context loaded")]
    NoContext,

    #[error("Failed to load model from {0:?}")]
    LoadFailed(PathBuf),

    #[error("Native decode failed with status {0}")]
    RunFailed(i32),

    #[error("Transcription task failed: {0}")]
    Transcribe(String),
}

impl From<std::io::Error> for SttError {
    fn from(err: std::io::Error) -> Self {
        SttError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SttError {
    fn from(err: toml::de::Error) -> Self {
        SttError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SttError {
    fn from(err: toml::ser::Error) -> Self {
        SttError::Serialization(err.to_string())
    }
}

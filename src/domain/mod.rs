pub mod audio;
pub mod config;
pub mod error;
pub mod model;
pub mod transcription;

pub use audio::{BitDepth, PcmBuffer};
pub use config::SttConfig;
pub use error::SttError;
pub use model::WhisperModel;
pub use transcription::DownloadProgress;

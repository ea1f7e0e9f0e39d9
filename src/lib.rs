//! On-device speech-to-text built on whisper.cpp.
//!
//! The crate covers three concerns: acquiring a model file (local cache
//! with a one-shot download on miss), normalizing raw PCM byte streams into
//! f32 samples, and driving a single serialized inference context to
//! produce text.
//!
//! ```no_run
//! use murmur::{BitDepth, PcmBuffer, Transcriber, WhisperModel};
//!
//! # async fn example(wav_bytes: Vec<u8>) -> Result<(), murmur::SttError> {
//! let transcriber = Transcriber::with_defaults()?;
//! transcriber
//!     .load_model(WhisperModel::BaseEn, false, true, None)
//!     .await?;
//!
//! let pcm = PcmBuffer::new(wav_bytes, BitDepth::Bits16);
//! transcriber.transcribe(&pcm, "en").await?;
//! println!("{}", transcriber.transcription()?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use adapters::{HttpDownloader, LocalModelStore, TomlConfigStore, WhisperCppRuntime};
pub use app::{InferenceEngine, ModelProgressFn, Transcriber};
pub use domain::{BitDepth, DownloadProgress, PcmBuffer, SttConfig, SttError, WhisperModel};
pub use infrastructure::init_logging;

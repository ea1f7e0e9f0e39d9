use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::{HttpDownloader, LocalModelStore, WhisperCppRuntime};
use crate::app::InferenceEngine;
use crate::domain::{DownloadProgress, PcmBuffer, SttConfig, SttError, WhisperModel};
use crate::ports::{Downloader, NativeRuntime, ProgressFn};

/// Callback invoked with catalog-level download progress.
pub type ModelProgressFn = Box<dyn Fn(DownloadProgress) + Send + Sync>;

/// Orchestrates model acquisition and transcription.
///
/// `load_model` resolves the local cache slot, downloads the model on a
/// miss, installs it atomically and hands the file to the engine; the
/// download-then-reload cycle runs at most once per call. `transcribe`
/// normalizes raw PCM bytes and drives a full decode on a blocking task.
pub struct Transcriber {
    store: LocalModelStore,
    downloader: Arc<dyn Downloader>,
    engine: Arc<InferenceEngine>,
}

impl Transcriber {
    pub fn new(
        store: LocalModelStore,
        downloader: Arc<dyn Downloader>,
        runtime: Arc<dyn NativeRuntime>,
    ) -> Self {
        Self {
            store,
            downloader,
            engine: Arc::new(InferenceEngine::new(runtime)),
        }
    }

    /// Production wiring: whisper.cpp runtime, HTTP downloads, models under
    /// the OS application-data directory.
    pub fn with_defaults() -> Result<Self, SttError> {
        Ok(Self::new(
            LocalModelStore::with_default_dir()?,
            Arc::new(HttpDownloader::new()?),
            Arc::new(WhisperCppRuntime::new()),
        ))
    }

    /// Production wiring with the storage directory taken from config.
    pub fn from_config(config: &SttConfig) -> Result<Self, SttError> {
        let models_dir = match &config.storage.models_dir {
            Some(dir) => dir.clone(),
            None => LocalModelStore::default_dir()?,
        };
        Ok(Self::new(
            LocalModelStore::new(models_dir),
            Arc::new(HttpDownloader::new()?),
            Arc::new(WhisperCppRuntime::new()),
        ))
    }

    /// Make a model available to the engine, downloading it first if the
    /// cache slot is empty.
    ///
    /// Progress events are informational only; the returned result is the
    /// single terminal outcome. A cache miss triggers exactly one download
    /// followed by one reload attempt; a slot still empty after a
    /// successful install is reported as `FileMissingAfterDownload` rather
    /// than retried.
    pub async fn load_model(
        &self,
        model: WhisperModel,
        use_gpu: bool,
        flash_attention: bool,
        progress: Option<ModelProgressFn>,
    ) -> Result<PathBuf, SttError> {
        let local = self.store.resolve(model)?;

        if self.store.exists(&local) {
            return self.load_into_engine(local, use_gpu, flash_attention).await;
        }

        info!(model = %model, "Model not cached, downloading");

        let temp = local.with_extension("download");
        let byte_progress: Option<ProgressFn> = progress.map(|p| {
            let wrapper: ProgressFn = Box::new(move |downloaded, total| {
                let mut dp = DownloadProgress::new(model);
                dp.update(downloaded, total);
                p(dp);
            });
            wrapper
        });

        self.downloader
            .download(&model.url(), &temp, byte_progress)
            .await
            .map_err(|e| SttError::Download(e.to_string()))?;

        self.store.install(&temp, &local)?;

        // One reload attempt after the download; a second miss is terminal.
        if !self.store.exists(&local) {
            return Err(SttError::FileMissingAfterDownload(local));
        }
        self.load_into_engine(local, use_gpu, flash_attention).await
    }

    /// Normalize a raw PCM byte stream and run a full decode.
    pub async fn transcribe(&self, pcm: &PcmBuffer, language: &str) -> Result<(), SttError> {
        let samples = pcm.normalize();

        let engine = self.engine.clone();
        let language = language.to_string();
        tokio::task::spawn_blocking(move || engine.run(&samples, &language))
            .await
            .map_err(|e| SttError::Transcribe(e.to_string()))?
    }

    /// Text of the last decode, segments concatenated in emission order.
    pub fn transcription(&self) -> Result<String, SttError> {
        self.engine.transcription()
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    async fn load_into_engine(
        &self,
        path: PathBuf,
        use_gpu: bool,
        flash_attention: bool,
    ) -> Result<PathBuf, SttError> {
        let engine = self.engine.clone();
        let load_path = path.clone();
        tokio::task::spawn_blocking(move || engine.load(&load_path, use_gpu, flash_attention))
            .await
            .map_err(|e| {
                warn!(error = %e, "Model load task failed");
                SttError::LoadFailed(path.clone())
            })??;
        Ok(path)
    }
}

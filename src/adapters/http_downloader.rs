use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::domain::SttError;
use crate::ports::{Downloader, ProgressFn};

/// Streaming HTTP downloader for model files.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with a rustls-backed client.
    pub fn new() -> Result<Self, SttError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Murmur/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SttError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<(), SttError> {
        Url::parse(url).map_err(|e| SttError::Http(format!("Invalid URL {}: {}", url, e)))?;

        info!(url = url, dest = ?dest, "Starting download");

        let response = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_secs(3600)) // 1 hour timeout for large models
            .send()
            .await
            .map_err(|e| SttError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SttError::Http(format!("HTTP {} for {}", status, url)));
        }

        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Nothing may remain at dest when the transfer fails partway.
        let cleanup = || {
            let dest = dest.to_path_buf();
            async move {
                let _ = tokio::fs::remove_file(&dest).await;
            }
        };

        let mut file = match tokio::fs::File::create(dest).await {
            Ok(f) => f,
            Err(e) => {
                cleanup().await;
                return Err(SttError::Io(e.to_string()));
            }
        };

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    drop(file);
                    cleanup().await;
                    return Err(SttError::Http(e.to_string()));
                }
            };

            if let Err(e) = file.write_all(&chunk).await {
                drop(file);
                cleanup().await;
                return Err(SttError::Io(e.to_string()));
            }

            downloaded += chunk.len() as u64;

            if let Some(callback) = &progress {
                callback(downloaded, total_size);
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            cleanup().await;
            return Err(SttError::Io(e.to_string()));
        }

        debug!(
            dest = ?dest,
            bytes = downloaded,
            "Download complete"
        );

        Ok(())
    }
}

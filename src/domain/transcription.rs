use serde::{Deserialize, Serialize};

use crate::domain::WhisperModel;

/// Progress information for a model download.
///
/// Transient and informational only: zero or more of these are emitted
/// before the terminal result of a `load_model` call, and they never carry
/// success or failure themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Model being downloaded.
    pub model: WhisperModel,
    /// Bytes downloaded so far.
    pub bytes_downloaded: u64,
    /// Total bytes to download (0 if unknown).
    pub bytes_total: u64,
    /// Download progress as percentage (0.0 - 100.0).
    pub percent: f32,
}

impl DownloadProgress {
    pub fn new(model: WhisperModel) -> Self {
        Self {
            model,
            bytes_downloaded: 0,
            bytes_total: 0,
            percent: 0.0,
        }
    }

    /// Update progress with downloaded bytes.
    pub fn update(&mut self, downloaded: u64, total: u64) {
        self.bytes_downloaded = downloaded;
        self.bytes_total = total;
        self.percent = if total > 0 {
            (downloaded as f32 / total as f32) * 100.0
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_progress() {
        let mut progress = DownloadProgress::new(WhisperModel::Base);
        progress.update(50, 100);
        assert_eq!(progress.percent, 50.0);
    }

    #[test]
    fn test_unknown_total_reports_zero_percent() {
        let mut progress = DownloadProgress::new(WhisperModel::Base);
        progress.update(1024, 0);
        assert_eq!(progress.percent, 0.0);
        assert_eq!(progress.bytes_downloaded, 1024);
    }
}

use std::path::Path;

use async_trait::async_trait;

use crate::domain::SttError;

/// Callback invoked with `(bytes_downloaded, bytes_total)` as a transfer
/// advances. `bytes_total` is 0 when the server does not report a length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Port for fetching model files over the network.
///
/// Implementations must invoke the progress callback zero or more times and
/// then complete exactly once. The destination only holds a fully written
/// artifact on success; on failure nothing is left behind at `dest`.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<(), SttError>;
}

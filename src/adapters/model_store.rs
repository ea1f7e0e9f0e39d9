use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{SttError, WhisperModel};

/// Filesystem cache of downloaded model files.
///
/// One file per variant, named by the catalog filename, inside a single
/// storage directory. There is no manifest: a model is installed exactly
/// when its file is present.
pub struct LocalModelStore {
    models_dir: PathBuf,
}

impl LocalModelStore {
    pub fn new(models_dir: PathBuf) -> Self {
        Self { models_dir }
    }

    /// Store rooted at the OS application-data directory.
    pub fn with_default_dir() -> Result<Self, SttError> {
        Ok(Self::new(Self::default_dir()?))
    }

    /// Default storage directory: `<app data>/Murmur/models`.
    pub fn default_dir() -> Result<PathBuf, SttError> {
        dirs::data_dir()
            .map(|p| p.join("Murmur").join("models"))
            .ok_or_else(|| {
                SttError::FolderResolution(
                    "Could not find application data directory".to_string(),
                )
            })
    }

    /// Resolve the cache slot for a model, creating the storage directory
    /// if absent. Read-only apart from that idempotent creation.
    pub fn resolve(&self, model: WhisperModel) -> Result<PathBuf, SttError> {
        fs::create_dir_all(&self.models_dir)
            .map_err(|e| SttError::FolderResolution(e.to_string()))?;
        Ok(self.models_dir.join(model.filename()))
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Atomically relocate a fully downloaded artifact into its cache slot.
    ///
    /// A rename either lands the complete file at `final_path` or leaves it
    /// untouched; on failure the temp artifact is removed so no partial
    /// state survives the call.
    pub fn install(&self, temp: &Path, final_path: &Path) -> Result<(), SttError> {
        match fs::rename(temp, final_path) {
            Ok(()) => {
                info!(path = ?final_path, "Model installed");
                Ok(())
            }
            Err(e) => {
                warn!(from = ?temp, to = ?final_path, error = %e, "Model install failed");
                let _ = fs::remove_file(temp);
                Err(SttError::Move {
                    from: temp.to_path_buf(),
                    to: final_path.to_path_buf(),
                    cause: e.to_string(),
                })
            }
        }
    }

    /// Scan the storage directory for catalog models already on disk.
    pub fn list_installed(&self) -> Vec<WhisperModel> {
        let Ok(entries) = fs::read_dir(&self.models_dir) else {
            return Vec::new();
        };

        let mut installed = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if let Some(model) = WhisperModel::from_filename(name) {
                debug!(model = %model, "Found installed model");
                installed.push(model);
            }
        }
        installed
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(tag: &str) -> LocalModelStore {
        let dir = env::temp_dir().join(format!("murmur_store_{}", tag));
        let _ = fs::remove_dir_all(&dir);
        LocalModelStore::new(dir)
    }

    #[test]
    fn test_resolve_creates_directory_and_appends_filename() {
        let store = temp_store("resolve");

        let path = store.resolve(WhisperModel::TinyQ5_1).unwrap();
        assert!(store.models_dir().is_dir());
        assert!(path.ends_with("ggml-tiny-q5_1.bin"));
        assert!(!store.exists(&path));

        let _ = fs::remove_dir_all(store.models_dir());
    }

    #[test]
    fn test_install_moves_artifact_into_slot() {
        let store = temp_store("install");
        let slot = store.resolve(WhisperModel::Tiny).unwrap();

        let temp = store.models_dir().join("ggml-tiny.bin.download");
        fs::write(&temp, b"model bytes").unwrap();

        store.install(&temp, &slot).unwrap();
        assert!(store.exists(&slot));
        assert!(!temp.exists());
        assert_eq!(fs::read(&slot).unwrap(), b"model bytes");

        let _ = fs::remove_dir_all(store.models_dir());
    }

    #[test]
    fn test_install_failure_removes_temp() {
        let store = temp_store("install_fail");
        let slot = store.resolve(WhisperModel::Tiny).unwrap();

        let missing = store.models_dir().join("nonexistent.download");
        let err = store.install(&missing, &slot).unwrap_err();
        assert!(matches!(err, SttError::Move { .. }));
        assert!(!store.exists(&slot));

        let _ = fs::remove_dir_all(store.models_dir());
    }

    #[test]
    fn test_list_installed_recognizes_catalog_names() {
        let store = temp_store("list");
        let slot = store.resolve(WhisperModel::BaseEn).unwrap();
        fs::write(&slot, b"x").unwrap();
        fs::write(store.models_dir().join("notes.txt"), b"x").unwrap();

        let installed = store.list_installed();
        assert_eq!(installed, vec![WhisperModel::BaseEn]);

        let _ = fs::remove_dir_all(store.models_dir());
    }
}

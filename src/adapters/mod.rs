pub mod config_store;
pub mod http_downloader;
pub mod model_store;
pub mod whisper_cpp;

pub use config_store::TomlConfigStore;
pub use http_downloader::HttpDownloader;
pub use model_store::LocalModelStore;
pub use whisper_cpp::WhisperCppRuntime;

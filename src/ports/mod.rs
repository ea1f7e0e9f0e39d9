pub mod config;
pub mod downloader;
pub mod engine;

pub use config::ConfigStore;
pub use downloader::{Downloader, ProgressFn};
pub use engine::{ContextParams, DecodeParams, NativeContext, NativeRuntime};

pub mod coordinator;
pub mod engine;

pub use coordinator::{ModelProgressFn, Transcriber};
pub use engine::InferenceEngine;

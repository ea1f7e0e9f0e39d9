use std::path::Path;

/// Parameters for native context initialization.
#[derive(Debug, Clone, Copy)]
pub struct ContextParams {
    /// Offload computation to the GPU.
    pub use_gpu: bool,
    /// Enable the flash-attention code path.
    pub flash_attention: bool,
}

/// Parameters for one full greedy decode pass.
#[derive(Debug, Clone)]
pub struct DecodeParams {
    /// Language tag (ISO 639-1, e.g. "en").
    pub language: String,
    /// Number of decoder threads.
    pub threads: i32,
    /// Emit per-segment timestamps.
    pub print_timestamps: bool,
    /// Force the whole audio into a single segment.
    pub single_segment: bool,
    /// Discard the text context between decode calls.
    pub no_context: bool,
    /// Translate to English instead of transcribing.
    pub translate: bool,
}

/// A loaded native model, opaque to everything but its runtime.
///
/// The handle is exclusively owned: it is never cloned, and dropping the
/// context frees the native resources exactly once.
pub trait NativeContext: Send {
    /// Run a full decode over the samples. Returns the native status code;
    /// zero is success.
    fn full_decode(&mut self, params: &DecodeParams, samples: &[f32]) -> i32;

    /// Number of text segments produced by the last decode.
    fn segment_count(&self) -> i32;

    /// Text of one segment, in emission order.
    fn segment_text(&self, index: i32) -> String;
}

/// Port for the native inference runtime (whisper.cpp in production).
pub trait NativeRuntime: Send + Sync {
    /// Initialize a context from a model file. `None` signals a native
    /// initialization failure.
    fn init_from_file(
        &self,
        path: &Path,
        params: ContextParams,
    ) -> Option<Box<dyn NativeContext>>;
}

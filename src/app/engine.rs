use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::SttError;
use crate::ports::{ContextParams, DecodeParams, NativeContext, NativeRuntime};

/// Upper bound on decoder threads regardless of core count.
const MAX_THREADS: i32 = 8;

/// Stateful inference engine owning at most one native model context.
///
/// Every operation takes the same mutex, so at most one of load, run and
/// transcription executes at any instant; concurrent callers queue in
/// arrival order. `run` holds the lock for the whole native decode, which is
/// CPU-bound and can take minutes for long audio, so callers should reach
/// it through a blocking task rather than an async executor thread.
pub struct InferenceEngine {
    runtime: Arc<dyn NativeRuntime>,
    ctx: Mutex<Option<Box<dyn NativeContext>>>,
}

impl InferenceEngine {
    pub fn new(runtime: Arc<dyn NativeRuntime>) -> Self {
        Self {
            runtime,
            ctx: Mutex::new(None),
        }
    }

    /// Initialize a context from a model file, replacing (and freeing) any
    /// previously loaded one. On failure the previous context is untouched.
    pub fn load(
        &self,
        path: &Path,
        use_gpu: bool,
        flash_attention: bool,
    ) -> Result<(), SttError> {
        let mut guard = self.ctx.lock();

        let params = ContextParams {
            use_gpu,
            flash_attention,
        };

        let new_ctx = self
            .runtime
            .init_from_file(path, params)
            .ok_or_else(|| SttError::LoadFailed(path.to_path_buf()))?;

        // Assignment drops the old context, freeing its native handle.
        let replaced = guard.replace(new_ctx).is_some();

        info!(path = ?path, replaced = replaced, "Model context loaded");
        Ok(())
    }

    /// Run a full greedy decode over normalized samples.
    ///
    /// A failed run keeps the context loaded; only the decode output is
    /// undefined afterwards.
    pub fn run(&self, samples: &[f32], language: &str) -> Result<(), SttError> {
        let mut guard = self.ctx.lock();
        let ctx = guard.as_mut().ok_or(SttError::NoContext)?;

        let params = DecodeParams {
            language: language.to_string(),
            threads: Self::thread_count(),
            print_timestamps: true,
            single_segment: false,
            no_context: true,
            translate: false,
        };

        debug!(
            samples = samples.len(),
            language = language,
            threads = params.threads,
            "Starting decode"
        );

        let start = Instant::now();
        let status = ctx.full_decode(&params, samples);

        if status != 0 {
            warn!(status = status, "Decode failed");
            return Err(SttError::RunFailed(status));
        }

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Decode complete"
        );
        Ok(())
    }

    /// Concatenate every segment of the last decode, in emission order.
    pub fn transcription(&self) -> Result<String, SttError> {
        let guard = self.ctx.lock();
        let ctx = guard.as_ref().ok_or(SttError::NoContext)?;

        let mut text = String::new();
        for index in 0..ctx.segment_count() {
            text.push_str(&ctx.segment_text(index));
        }
        Ok(text)
    }

    pub fn is_loaded(&self) -> bool {
        self.ctx.lock().is_some()
    }

    /// Free the current context, returning the engine to its unloaded state.
    pub fn unload(&self) {
        let had_model = self.ctx.lock().take().is_some();
        if had_model {
            info!("Model context freed");
        }
    }

    /// Leave two cores for the rest of the system, within [1, 8].
    fn thread_count() -> i32 {
        let cores = std::thread::available_parallelism()
            .map(|p| p.get() as i32)
            .unwrap_or(4);
        (cores - 2).clamp(1, MAX_THREADS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fake context that records decode enter/exit times and frees through
    /// a shared counter.
    struct FakeContext {
        decode_status: i32,
        segments: Vec<String>,
        decode_spans: Arc<Mutex<Vec<(Instant, Instant)>>>,
        freed: Arc<AtomicUsize>,
    }

    impl NativeContext for FakeContext {
        fn full_decode(&mut self, _params: &DecodeParams, _samples: &[f32]) -> i32 {
            let enter = Instant::now();
            std::thread::sleep(Duration::from_millis(30));
            self.decode_spans.lock().push((enter, Instant::now()));
            self.decode_status
        }

        fn segment_count(&self) -> i32 {
            self.segments.len() as i32
        }

        fn segment_text(&self, index: i32) -> String {
            self.segments[index as usize].clone()
        }
    }

    impl Drop for FakeContext {
        fn drop(&mut self) {
            self.freed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeRuntime {
        decode_status: i32,
        segments: Vec<String>,
        fail_init: AtomicBool,
        decode_spans: Arc<Mutex<Vec<(Instant, Instant)>>>,
        freed: Arc<AtomicUsize>,
        init_calls: AtomicI32,
    }

    impl FakeRuntime {
        fn new() -> Self {
            Self {
                decode_status: 0,
                segments: Vec::new(),
                fail_init: AtomicBool::new(false),
                decode_spans: Arc::new(Mutex::new(Vec::new())),
                freed: Arc::new(AtomicUsize::new(0)),
                init_calls: AtomicI32::new(0),
            }
        }
    }

    impl NativeRuntime for FakeRuntime {
        fn init_from_file(
            &self,
            _path: &Path,
            _params: ContextParams,
        ) -> Option<Box<dyn NativeContext>> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_init.load(Ordering::SeqCst) {
                return None;
            }
            Some(Box::new(FakeContext {
                decode_status: self.decode_status,
                segments: self.segments.clone(),
                decode_spans: self.decode_spans.clone(),
                freed: self.freed.clone(),
            }))
        }
    }

    #[test]
    fn test_operations_without_context() {
        let engine = InferenceEngine::new(Arc::new(FakeRuntime::new()));
        assert!(!engine.is_loaded());
        assert!(matches!(
            engine.transcription().unwrap_err(),
            SttError::NoContext
        ));
        assert!(matches!(
            engine.run(&[0.0], "en").unwrap_err(),
            SttError::NoContext
        ));
    }

    #[test]
    fn test_load_replaces_and_frees_old_context() {
        let runtime = Arc::new(FakeRuntime::new());
        let freed = runtime.freed.clone();
        let engine = InferenceEngine::new(runtime);

        engine.load(Path::new("a.bin"), false, true).unwrap();
        assert_eq!(freed.load(Ordering::SeqCst), 0);

        engine.load(Path::new("b.bin"), false, true).unwrap();
        assert_eq!(freed.load(Ordering::SeqCst), 1);
        assert!(engine.is_loaded());

        engine.unload();
        assert_eq!(freed.load(Ordering::SeqCst), 2);
        assert!(!engine.is_loaded());
    }

    #[test]
    fn test_failed_load_keeps_previous_context() {
        let mut runtime = FakeRuntime::new();
        runtime.segments = vec!["hello".to_string()];
        let runtime = Arc::new(runtime);
        let engine = InferenceEngine::new(runtime.clone());

        engine.load(Path::new("a.bin"), false, true).unwrap();

        runtime.fail_init.store(true, Ordering::SeqCst);
        assert!(matches!(
            engine.load(Path::new("missing.bin"), false, true),
            Err(SttError::LoadFailed(_))
        ));

        // The old context survives a failed replacement.
        assert!(engine.is_loaded());
        assert_eq!(runtime.freed.load(Ordering::SeqCst), 0);
        assert_eq!(engine.transcription().unwrap(), "hello");
    }

    #[test]
    fn test_failed_run_retains_context() {
        let mut runtime = FakeRuntime::new();
        runtime.decode_status = -6;
        runtime.segments = vec!["kept".to_string()];
        let engine = InferenceEngine::new(Arc::new(runtime));

        engine.load(Path::new("a.bin"), false, true).unwrap();
        assert!(matches!(
            engine.run(&[0.0; 16], "en").unwrap_err(),
            SttError::RunFailed(-6)
        ));
        assert!(engine.is_loaded());
        assert_eq!(engine.transcription().unwrap(), "kept");
    }

    #[test]
    fn test_transcription_concatenates_segments_in_order() {
        let mut runtime = FakeRuntime::new();
        runtime.segments = vec![" one".to_string(), " two".to_string(), " three".to_string()];
        let engine = InferenceEngine::new(Arc::new(runtime));

        engine.load(Path::new("a.bin"), false, true).unwrap();
        engine.run(&[0.0; 16], "en").unwrap();
        assert_eq!(engine.transcription().unwrap(), " one two three");
    }

    #[test]
    fn test_concurrent_runs_never_overlap() {
        let runtime = Arc::new(FakeRuntime::new());
        let spans = runtime.decode_spans.clone();
        let engine = Arc::new(InferenceEngine::new(runtime));
        engine.load(Path::new("a.bin"), false, true).unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let engine = engine.clone();
            handles.push(std::thread::spawn(move || {
                engine.run(&[0.0; 16], "en").unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mut spans = spans.lock().clone();
        spans.sort_by_key(|(enter, _)| *enter);
        assert_eq!(spans.len(), 4);
        for pair in spans.windows(2) {
            let (_, exit) = pair[0];
            let (enter, _) = pair[1];
            assert!(exit <= enter, "decodes overlapped in time");
        }
    }
}

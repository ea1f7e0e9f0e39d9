use std::path::Path;

use tracing::{debug, info, warn};
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
};

use crate::ports::{ContextParams, DecodeParams, NativeContext, NativeRuntime};

/// Native runtime backed by whisper.cpp via whisper-rs.
pub struct WhisperCppRuntime;

impl WhisperCppRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WhisperCppRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeRuntime for WhisperCppRuntime {
    fn init_from_file(
        &self,
        path: &Path,
        params: ContextParams,
    ) -> Option<Box<dyn NativeContext>> {
        let path_str = path.to_str()?;

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(params.use_gpu);
        ctx_params.flash_attn(params.flash_attention);

        let ctx = match WhisperContext::new_with_params(path_str, ctx_params) {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(path = ?path, error = %e, "whisper context init failed");
                return None;
            }
        };

        let state = match ctx.create_state() {
            Ok(state) => state,
            Err(e) => {
                warn!(path = ?path, error = %e, "whisper state init failed");
                return None;
            }
        };

        info!(
            path = ?path,
            use_gpu = params.use_gpu,
            flash_attention = params.flash_attention,
            "Whisper model loaded"
        );

        Some(Box::new(WhisperCppContext { _ctx: ctx, state }))
    }
}

/// One loaded whisper.cpp model. The context and its decode state are freed
/// together on drop.
struct WhisperCppContext {
    _ctx: WhisperContext,
    state: WhisperState,
}

impl NativeContext for WhisperCppContext {
    fn full_decode(&mut self, params: &DecodeParams, samples: &[f32]) -> i32 {
        let mut fp = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        fp.set_n_threads(params.threads);
        fp.set_print_progress(false);
        fp.set_print_realtime(false);
        fp.set_print_special(false);
        fp.set_print_timestamps(params.print_timestamps);
        fp.set_translate(params.translate);
        fp.set_language(Some(&params.language));
        fp.set_no_context(params.no_context);
        fp.set_single_segment(params.single_segment);

        match self.state.full(fp, samples) {
            Ok(_) => 0,
            Err(e) => {
                warn!(error = %e, "whisper_full failed");
                -1
            }
        }
    }

    fn segment_count(&self) -> i32 {
        self.state.full_n_segments().unwrap_or(0)
    }

    fn segment_text(&self, index: i32) -> String {
        match self.state.full_get_segment_text(index) {
            Ok(text) => text,
            Err(e) => {
                debug!(index = index, error = %e, "segment text unavailable");
                String::new()
            }
        }
    }
}

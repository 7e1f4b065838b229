//! Whisper transcription backend.
//!
//! Uses whisper.cpp via whisper-rs for speech-to-text.

use std::path::Path;

use tracing::{debug, info};
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
};

use super::{EXPECTED_SAMPLE_RATE, EngineError, Transcriber};
use crate::segment::Span;

/// Whisper speech-to-text transcriber.
///
/// The underlying WhisperContext is leaked intentionally - the model stays
/// loaded for the process lifetime. This avoids complex self-referential
/// struct patterns while allowing the state to be reused across runs.
pub struct WhisperTranscriber {
    state: WhisperState,
    language: Option<String>,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber.
    ///
    /// # Arguments
    /// * `model_path` - Path to the Whisper GGML model file
    /// * `language` - Language code (e.g., "en", "de") or None for auto-detect
    pub fn new(model_path: impl AsRef<Path>, language: Option<String>) -> Result<Self, EngineError> {
        // Route whisper.cpp and GGML logs through tracing
        static LOGGING_HOOKS: std::sync::Once = std::sync::Once::new();
        LOGGING_HOOKS.call_once(whisper_rs::install_logging_hooks);

        let path = model_path.as_ref();
        info!(
            path = %path.display(),
            language = ?language,
            "Loading Whisper model"
        );

        let path_str = path.to_str().ok_or_else(|| EngineError::ModelLoad {
            path: path.display().to_string(),
            reason: "model path is not valid UTF-8".to_string(),
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| EngineError::ModelLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        // Box and leak the context to get a 'static reference; the model is
        // loaded once per process.
        let ctx_ref: &'static WhisperContext = Box::leak(Box::new(ctx));

        let state = ctx_ref.create_state().map_err(|e| EngineError::ModelLoad {
            path: path.display().to_string(),
            reason: format!("failed to create inference state: {e}"),
        })?;

        info!("Whisper model and state loaded successfully");

        Ok(Self { state, language })
    }

    /// Get the configured language.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&mut self, audio: &[f32], sample_rate: u32) -> Result<Vec<Span>, EngineError> {
        debug!(
            samples = audio.len(),
            sample_rate = sample_rate,
            duration_secs = audio.len() as f32 / sample_rate as f32,
            "Transcribing audio with Whisper"
        );

        if sample_rate != EXPECTED_SAMPLE_RATE {
            return Err(EngineError::UnsupportedSampleRate { sample_rate });
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        // None means auto-detect
        params.set_language(self.language.as_deref());

        // Disable printing to stdout
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        self.state
            .full(params, audio)
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let num_segments = self.state.full_n_segments();
        let mut spans = Vec::new();

        for i in 0..num_segments {
            let Some(segment) = self.state.get_segment(i) else {
                continue;
            };
            let Ok(text) = segment.to_str_lossy() else {
                continue;
            };
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            // Whisper timestamps are in centiseconds.
            spans.push(Span {
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text,
            });
        }

        debug!(spans = spans.len(), "Transcription complete");

        Ok(spans)
    }
}

//! Speech-to-text transcription.
//!
//! This module provides a trait abstraction for transcription backends
//! and implementations for specific models. Backends produce timestamped
//! [`Span`]s; turning those into caption segments is the job of
//! [`crate::segment`].

use thiserror::Error;

use crate::segment::Span;

mod whisper;

pub use whisper::WhisperTranscriber;

/// Sample rate expected by all transcription backends, in Hz.
pub const EXPECTED_SAMPLE_RATE: u32 = 16000;

/// Failures raised by a transcription backend, kept distinct from
/// segmentation errors so hosts can tell engine trouble apart from
/// core logic trouble.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The model file could not be loaded.
    #[error("failed to load speech model from {path}: {reason}")]
    ModelLoad { path: String, reason: String },
    /// The audio did not meet the backend's input contract.
    #[error("expected {EXPECTED_SAMPLE_RATE}Hz mono audio, got {sample_rate}Hz")]
    UnsupportedSampleRate { sample_rate: u32 },
    /// Inference itself failed.
    #[error("speech inference failed: {0}")]
    Inference(String),
}

/// Speech-to-text transcriber.
///
/// Implementations convert audio samples into chronologically ordered,
/// timestamped spans.
pub trait Transcriber: Send {
    /// Transcribe audio samples into spans.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as f32, expected to be 16kHz mono
    /// * `sample_rate` - Sample rate of the audio in Hz (must be 16000)
    ///
    /// # Returns
    /// Spans in chronological order, or an error if transcription failed.
    /// An empty result is valid (silence).
    fn transcribe(&mut self, audio: &[f32], sample_rate: u32) -> Result<Vec<Span>, EngineError>;
}

//! Transcription engine that coordinates the pipeline.
//!
//! The engine owns and orchestrates:
//! - Model resolution and download
//! - Speech-to-text transcription
//! - Caption segmentation

use anyhow::{Context, Result};
use tracing::info;

use crate::audio::{AudioBuffer, TARGET_SAMPLE_RATE, resample_to_target};
use crate::config::{Config, SpeechModel};
use crate::models::{ModelId, ModelManager};
use crate::segment::{Transcript, segment_spans};
use crate::transcribe::{Transcriber, WhisperTranscriber};

/// Events emitted during engine initialization.
#[derive(Debug, Clone)]
pub enum InitEvent {
    /// Model is being downloaded.
    Downloading {
        model: String,
        bytes: u64,
        total: u64,
    },
    /// Model is being loaded into memory.
    Loading { model: String },
    /// Engine is ready.
    Ready,
}

/// Transcription engine.
///
/// The model is loaded once per engine and reused across invocations; hosts
/// wanting concurrent transcription should serialize access or pool engines.
pub struct Engine {
    config: Config,
    model_manager: ModelManager,
    transcriber: Option<Box<dyn Transcriber>>,
}

impl Engine {
    /// Create a new engine with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let model_manager = ModelManager::new()?;
        Ok(Self {
            config,
            model_manager,
            transcriber: None,
        })
    }

    /// Create a new engine with a custom model manager.
    pub fn with_model_manager(config: Config, model_manager: ModelManager) -> Self {
        Self {
            config,
            model_manager,
            transcriber: None,
        }
    }

    /// Create an engine around an already-built transcriber.
    ///
    /// Skips model download and loading; used to substitute a mock backend
    /// in tests.
    pub fn with_transcriber(config: Config, transcriber: Box<dyn Transcriber>) -> Self {
        Self {
            config,
            model_manager: ModelManager::with_dir(std::env::temp_dir()),
            transcriber: Some(transcriber),
        }
    }

    /// Check if the engine has been initialized (model loaded).
    pub fn is_initialized(&self) -> bool {
        self.transcriber.is_some()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize the engine: download and load the configured model.
    ///
    /// Calls `on_progress` with status updates suitable for UI display.
    /// After this returns Ok(()), the engine is ready for `transcribe()`.
    pub async fn initialize(&mut self, on_progress: impl Fn(InitEvent) + Send + Sync) -> Result<()> {
        if self.transcriber.is_some() {
            return Ok(());
        }

        info!("Initializing engine");

        let model_id = speech_model_to_model_id(self.config.model.model);
        let model_name = model_id.to_string();

        let model_path = self
            .model_manager
            .ensure_model(model_id, &|bytes, total| {
                on_progress(InitEvent::Downloading {
                    model: model_name.clone(),
                    bytes,
                    total,
                });
            })
            .await
            .context("Failed to ensure Whisper model")?;

        on_progress(InitEvent::Loading {
            model: model_name.clone(),
        });

        let transcriber =
            WhisperTranscriber::new(&model_path, self.config.model.language_hint())
                .context("Failed to initialize Whisper")?;
        self.transcriber = Some(Box::new(transcriber));

        on_progress(InitEvent::Ready);
        info!("Engine initialized");

        Ok(())
    }

    /// Transcribe an audio buffer into a caption transcript.
    ///
    /// The buffer is resampled to 16kHz if needed, run through the
    /// transcription backend, and the resulting spans are segmented
    /// according to the configured strategy. Requires `initialize()` to
    /// have been called first (or a pre-built transcriber).
    pub fn transcribe(&mut self, audio: &AudioBuffer) -> Result<Transcript> {
        let transcriber = self
            .transcriber
            .as_mut()
            .context("Engine not initialized — call initialize() first")?;

        let audio = if audio.sample_rate == TARGET_SAMPLE_RATE {
            std::borrow::Cow::Borrowed(audio)
        } else {
            std::borrow::Cow::Owned(resample_to_target(audio)?)
        };

        info!(
            duration_secs = audio.duration_secs(),
            sample_rate = audio.sample_rate,
            "Transcribing audio"
        );

        let spans = transcriber.transcribe(&audio.samples, audio.sample_rate)?;

        let transcript = segment_spans(&spans, &self.config.segmentation.options())?;

        info!(
            spans = spans.len(),
            segments = transcript.segments.len(),
            text_len = transcript.text.len(),
            "Transcription complete"
        );

        Ok(transcript)
    }
}

/// Convert SpeechModel config to ModelId for download.
pub fn speech_model_to_model_id(model: SpeechModel) -> ModelId {
    match model {
        SpeechModel::WhisperTiny => ModelId::WhisperTiny,
        SpeechModel::WhisperTinyEn => ModelId::WhisperTinyEn,
        SpeechModel::WhisperBase => ModelId::WhisperBase,
        SpeechModel::WhisperBaseEn => ModelId::WhisperBaseEn,
        SpeechModel::WhisperSmall => ModelId::WhisperSmall,
        SpeechModel::WhisperSmallEn => ModelId::WhisperSmallEn,
        SpeechModel::WhisperMedium => ModelId::WhisperMedium,
        SpeechModel::WhisperMediumEn => ModelId::WhisperMediumEn,
        SpeechModel::WhisperLargeV3 => ModelId::WhisperLargeV3,
        SpeechModel::WhisperLargeV3Turbo => ModelId::WhisperLargeV3Turbo,
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

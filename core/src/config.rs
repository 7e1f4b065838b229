//! Configuration management for capscribe.
//!
//! Handles loading, saving, and providing defaults for the configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::segment::{
    AnchorScope, DEFAULT_MAX_CHARS, DEFAULT_UNIFORM_UNIT_SECS, SegmentOptions, SegmentationMode,
};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub segmentation: SegmentationConfig,
    pub logging: LoggingConfig,
}

/// Configuration for the speech recognition model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Speech recognition model to use.
    pub model: SpeechModel,
    /// Language to recognize. Use "auto" for automatic detection.
    pub language: String,
}

/// Configuration for caption segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Maximum characters per caption segment.
    pub max_chars: usize,
    /// Segmentation strategy: "word-anchored", "uniform", or "passthrough".
    pub mode: SegmentationMode,
    /// Anchor search scope for word-anchored mode: "span" or "transcript".
    pub anchor: AnchorScope,
    /// Synthetic per-segment duration for uniform mode, in seconds.
    pub uniform_segment_secs: f64,
}

/// Supported speech recognition models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechModel {
    // Whisper models (OpenAI) - via whisper.cpp
    WhisperTiny,
    WhisperTinyEn,
    #[default]
    WhisperBase,
    WhisperBaseEn,
    WhisperSmall,
    WhisperSmallEn,
    WhisperMedium,
    WhisperMediumEn,
    WhisperLargeV3,
    WhisperLargeV3Turbo,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: LogLevel,
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to a tracing filter directive string for the core crate.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "capscribe_core=error",
            LogLevel::Warn => "capscribe_core=warn",
            LogLevel::Info => "capscribe_core=info",
            LogLevel::Debug => "capscribe_core=debug",
            LogLevel::Trace => "capscribe_core=trace",
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: SpeechModel::default(),
            language: "auto".to_string(),
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            mode: SegmentationMode::default(),
            anchor: AnchorScope::default(),
            uniform_segment_secs: DEFAULT_UNIFORM_UNIT_SECS,
        }
    }
}

impl SegmentationConfig {
    /// Build segmentation options from this config section.
    pub fn options(&self) -> SegmentOptions {
        SegmentOptions {
            max_chars: self.max_chars,
            mode: self.mode,
            anchor: self.anchor,
            uniform_unit_secs: self.uniform_segment_secs,
        }
    }
}

impl ModelConfig {
    /// Language hint for the transcriber; `None` means auto-detect.
    pub fn language_hint(&self) -> Option<String> {
        if self.language == "auto" {
            None
        } else {
            Some(self.language.clone())
        }
    }
}

impl Config {
    /// Returns the default config directory path.
    /// `~/.config/capscribe/` (or `$XDG_CONFIG_HOME/capscribe/`)
    pub fn config_dir() -> Result<PathBuf> {
        crate::dirs::config_dir()
    }

    /// Returns the default config file path.
    /// `~/.config/capscribe/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Returns the default data directory path.
    /// `~/.local/share/capscribe/` (or `$XDG_DATA_HOME/capscribe/`)
    pub fn data_dir() -> Result<PathBuf> {
        crate::dirs::data_dir()
    }

    /// Returns the default models directory path.
    /// `~/.local/share/capscribe/models/`
    pub fn models_dir() -> Result<PathBuf> {
        Self::data_dir().map(|p| p.join("models"))
    }

    /// Load configuration from the default path.
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file as TOML")
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

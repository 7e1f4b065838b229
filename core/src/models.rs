//! Model download and management.
//!
//! Handles automatic downloading of Whisper GGML models on first run.

use anyhow::{Context, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Identifier for downloadable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    /// Whisper tiny model (~75MB).
    WhisperTiny,
    /// Whisper tiny English-only model (~75MB).
    WhisperTinyEn,
    /// Whisper base model (~150MB).
    WhisperBase,
    /// Whisper base English-only model (~150MB).
    WhisperBaseEn,
    /// Whisper small model (~500MB).
    WhisperSmall,
    /// Whisper small English-only model (~500MB).
    WhisperSmallEn,
    /// Whisper medium model (~1.5GB).
    WhisperMedium,
    /// Whisper medium English-only model (~1.5GB).
    WhisperMediumEn,
    /// Whisper large-v3 model (~3GB).
    WhisperLargeV3,
    /// Whisper large-v3-turbo model (~1.5GB).
    WhisperLargeV3Turbo,
}

const WHISPER_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

impl ModelId {
    /// Get model metadata.
    fn info(&self) -> ModelInfo {
        match self {
            ModelId::WhisperTiny => ModelInfo {
                filename: "ggml-tiny.bin",
                url: format!("{}/ggml-tiny.bin", WHISPER_BASE_URL),
                size_bytes: Some(77_691_713),
            },
            ModelId::WhisperTinyEn => ModelInfo {
                filename: "ggml-tiny.en.bin",
                url: format!("{}/ggml-tiny.en.bin", WHISPER_BASE_URL),
                size_bytes: Some(77_704_715),
            },
            ModelId::WhisperBase => ModelInfo {
                filename: "ggml-base.bin",
                url: format!("{}/ggml-base.bin", WHISPER_BASE_URL),
                size_bytes: Some(147_951_465),
            },
            ModelId::WhisperBaseEn => ModelInfo {
                filename: "ggml-base.en.bin",
                url: format!("{}/ggml-base.en.bin", WHISPER_BASE_URL),
                size_bytes: Some(147_964_211),
            },
            ModelId::WhisperSmall => ModelInfo {
                filename: "ggml-small.bin",
                url: format!("{}/ggml-small.bin", WHISPER_BASE_URL),
                size_bytes: Some(487_601_967),
            },
            ModelId::WhisperSmallEn => ModelInfo {
                filename: "ggml-small.en.bin",
                url: format!("{}/ggml-small.en.bin", WHISPER_BASE_URL),
                size_bytes: Some(487_614_201),
            },
            ModelId::WhisperMedium => ModelInfo {
                filename: "ggml-medium.bin",
                url: format!("{}/ggml-medium.bin", WHISPER_BASE_URL),
                size_bytes: Some(1_533_774_781),
            },
            ModelId::WhisperMediumEn => ModelInfo {
                filename: "ggml-medium.en.bin",
                url: format!("{}/ggml-medium.en.bin", WHISPER_BASE_URL),
                size_bytes: Some(1_533_774_781),
            },
            ModelId::WhisperLargeV3 => ModelInfo {
                filename: "ggml-large-v3.bin",
                url: format!("{}/ggml-large-v3.bin", WHISPER_BASE_URL),
                size_bytes: Some(3_094_623_691),
            },
            ModelId::WhisperLargeV3Turbo => ModelInfo {
                filename: "ggml-large-v3-turbo.bin",
                url: format!("{}/ggml-large-v3-turbo.bin", WHISPER_BASE_URL),
                size_bytes: Some(1_624_592_891),
            },
        }
    }

    /// Model filename within the models directory.
    pub fn filename(&self) -> &'static str {
        self.info().filename
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().filename.trim_end_matches(".bin"))
    }
}

/// Metadata for a downloadable model.
struct ModelInfo {
    /// Filename to save as.
    filename: &'static str,
    /// Download URL.
    url: String,
    /// Expected file size for validation (optional).
    size_bytes: Option<u64>,
}

/// Progress callback for downloads: `(bytes_downloaded, total_bytes)`.
pub type DownloadProgress<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Manages model downloads and storage.
pub struct ModelManager {
    models_dir: PathBuf,
}

impl ModelManager {
    /// Create a new ModelManager using the default models directory.
    ///
    /// Default: `~/.local/share/capscribe/models/`
    pub fn new() -> Result<Self> {
        let models_dir = crate::dirs::data_dir()?.join("models");
        Ok(Self { models_dir })
    }

    /// Create a ModelManager with a custom models directory.
    pub fn with_dir(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Get the models directory path.
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Ensure a model is available, downloading if necessary.
    ///
    /// Returns the path to the model file. `on_progress` is called with
    /// `(bytes_downloaded, total_bytes)` while a download is in flight.
    pub async fn ensure_model(
        &self,
        model: ModelId,
        on_progress: DownloadProgress<'_>,
    ) -> Result<PathBuf> {
        let info = model.info();
        let model_path = self.models_dir.join(info.filename);

        if model_path.exists() {
            // Validate size if known
            if let Some(expected_size) = info.size_bytes {
                let metadata = fs::metadata(&model_path)
                    .await
                    .context("Failed to read model metadata")?;
                let actual_size = metadata.len();

                if actual_size != expected_size {
                    warn!(
                        model = ?model,
                        expected = expected_size,
                        actual = actual_size,
                        "Model size mismatch, re-downloading"
                    );
                    fs::remove_file(&model_path)
                        .await
                        .context("Failed to remove corrupted model")?;
                } else {
                    debug!(path = %model_path.display(), "Model already exists");
                    return Ok(model_path);
                }
            } else {
                debug!(path = %model_path.display(), "Model already exists");
                return Ok(model_path);
            }
        }

        self.download_model(&info, &model_path, on_progress).await?;
        Ok(model_path)
    }

    /// Download a model from its URL, streaming it to disk.
    async fn download_model(
        &self,
        info: &ModelInfo,
        dest: &Path,
        on_progress: DownloadProgress<'_>,
    ) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create models directory")?;
        }

        info!(
            url = %info.url,
            dest = %dest.display(),
            "Downloading model"
        );

        let response = reqwest::get(&info.url)
            .await
            .with_context(|| format!("Failed to download model from {}", info.url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to download model: HTTP {}", response.status());
        }

        let total = response
            .content_length()
            .or(info.size_bytes)
            .unwrap_or(0);

        // Write to temporary file first, then rename (atomic)
        let temp_path = dest.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)
            .await
            .context("Failed to create temporary model file")?;

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Failed to read download stream")?;
            file.write_all(&chunk)
                .await
                .context("Failed to write model file")?;
            downloaded += chunk.len() as u64;
            on_progress(downloaded, total);
        }
        file.sync_all().await.context("Failed to sync model file")?;
        drop(file);

        if let Some(expected) = info.size_bytes {
            if downloaded != expected {
                let _ = fs::remove_file(&temp_path).await;
                anyhow::bail!(
                    "Downloaded model size mismatch: expected {}, got {}",
                    expected,
                    downloaded
                );
            }
        }

        fs::rename(&temp_path, dest)
            .await
            .context("Failed to finalize model file")?;

        info!(
            path = %dest.display(),
            size = downloaded,
            "Model downloaded successfully"
        );

        Ok(())
    }
}

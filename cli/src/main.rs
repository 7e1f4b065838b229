use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use capscribe_core::audio;
use capscribe_core::config::Config;
use capscribe_core::engine::{Engine, InitEvent, speech_model_to_model_id};
use capscribe_core::models::ModelManager;
use capscribe_core::segment::SegmentationMode;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Application-specific environment variable for log filtering (overrides config).
const LOG_ENV_VAR: &str = "CAPSCRIBE_LOG";

/// File extensions accepted for transcription.
const ALLOWED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "m4a", "ogg", "flac"];

#[derive(Parser)]
#[command(name = "capscribe")]
#[command(about = "Offline audio transcription with caption-length, time-aligned segments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file and print the transcript as JSON
    Transcribe {
        /// Audio file to transcribe (16-bit or float WAV)
        file: PathBuf,
        /// Maximum characters per caption segment
        #[arg(long)]
        max_chars: Option<usize>,
        /// Segmentation strategy
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Manage speech models
    Model {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Show the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Download the configured model if it is not already present
    Download,
    /// Print the models directory path
    Dir,
}

/// Segmentation strategy flag, mirroring the config file values.
#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    WordAnchored,
    Uniform,
    Passthrough,
}

impl From<ModeArg> for SegmentationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WordAnchored => SegmentationMode::WordAnchored,
            ModeArg::Uniform => SegmentationMode::Uniform,
            ModeArg::Passthrough => SegmentationMode::Passthrough,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    // CAPSCRIBE_LOG env var overrides config file level
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(config.logging.level.as_directive().parse()?)
        .from_env()?;

    // Logs go to stderr; stdout is reserved for transcript output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Transcribe {
            file,
            max_chars,
            mode,
        } => transcribe(config, &file, max_chars, mode).await,
        Commands::Model { command } => match command {
            ModelCommands::Download => download_model(config).await,
            ModelCommands::Dir => {
                let manager = ModelManager::new()?;
                println!("{}", manager.models_dir().display());
                Ok(())
            }
        },
        Commands::Config => {
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to render config")?
            );
            Ok(())
        }
    }
}

async fn transcribe(
    mut config: Config,
    file: &Path,
    max_chars: Option<usize>,
    mode: Option<ModeArg>,
) -> anyhow::Result<()> {
    check_extension(file)?;

    if let Some(max_chars) = max_chars {
        config.segmentation.max_chars = max_chars;
    }
    if let Some(mode) = mode {
        config.segmentation.mode = mode.into();
    }

    let buffer = audio::load_wav(file)?;
    tracing::info!(
        path = %file.display(),
        duration_secs = buffer.duration_secs(),
        "Loaded audio file"
    );

    let mut engine = Engine::new(config)?;
    initialize_with_progress(&mut engine).await?;

    let transcript = engine.transcribe(&buffer)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&transcript).context("Failed to serialize transcript")?
    );

    Ok(())
}

async fn download_model(config: Config) -> anyhow::Result<()> {
    let manager = ModelManager::new()?;
    let model_id = speech_model_to_model_id(config.model.model);

    let bar = download_bar();
    let path = manager
        .ensure_model(model_id, &|bytes, total| {
            update_download_bar(&bar, bytes, total);
        })
        .await?;
    bar.finish_and_clear();

    println!("{}", path.display());
    Ok(())
}

/// Drive the engine initialization, rendering downloads as a progress bar.
async fn initialize_with_progress(engine: &mut Engine) -> anyhow::Result<()> {
    let bar = download_bar();
    engine
        .initialize(|event| match event {
            InitEvent::Downloading {
                model,
                bytes,
                total,
            } => {
                bar.set_message(model);
                update_download_bar(&bar, bytes, total);
            }
            InitEvent::Loading { model } => {
                bar.finish_and_clear();
                eprintln!("Loading model {model}...");
            }
            InitEvent::Ready => {}
        })
        .await?;
    bar.finish_and_clear();
    Ok(())
}

/// A hidden progress bar that reveals itself on the first update.
fn download_bar() -> ProgressBar {
    let bar = ProgressBar::hidden();
    bar.set_style(
        ProgressStyle::with_template("{msg} {bar:40} {bytes}/{total_bytes}")
            .expect("valid progress template"),
    );
    bar
}

fn update_download_bar(bar: &ProgressBar, bytes: u64, total: u64) {
    if bar.is_hidden() {
        bar.set_draw_target(ProgressDrawTarget::stderr());
    }
    if total > 0 {
        bar.set_length(total);
    }
    bar.set_position(bytes);
}

/// Reject files the pipeline cannot handle before doing any work.
fn check_extension(path: &Path) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .with_context(|| format!("File has no extension: {}", path.display()))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "Unsupported audio format .{ext} (allowed: {})",
            ALLOWED_EXTENSIONS.join(", ")
        );
    }
    // The other allowed formats need a decoder this build doesn't carry.
    if ext != "wav" {
        bail!("Compressed format .{ext} is not decodable here; convert to WAV first");
    }

    Ok(())
}

//! Audio file loading and processing.
//!
//! Handles WAV decoding and resampling to 16kHz mono for speech recognition.

use anyhow::{Context, Result};
use audioadapter_buffers::direct::SequentialSliceOfVecs;
use rubato::audioadapter::Adapter;
use rubato::{Fft, FixedSync, Resampler};
use std::path::Path;

/// Target sample rate for speech recognition models.
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Input chunk size used when resampling whole files.
const RESAMPLER_CHUNK: usize = 1024;

/// Audio buffer containing mono f32 samples at a known sample rate.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new audio buffer.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration of the buffer in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Convert multi-channel interleaved samples to mono by averaging all channels.
pub fn to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels == 1 {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Load a WAV file as mono f32 samples at the file's native sample rate.
pub fn load_wav(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .context("Failed to read float samples")?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .context("Failed to read integer samples")?
        }
    };

    tracing::debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        samples = samples.len(),
        "Loaded WAV file"
    );

    Ok(AudioBuffer::new(
        to_mono(&samples, spec.channels),
        spec.sample_rate,
    ))
}

/// Resample a buffer to [`TARGET_SAMPLE_RATE`].
///
/// The input is padded with silence to a whole number of resampler chunks;
/// the output is trimmed back to the expected duration.
pub fn resample_to_target(buffer: &AudioBuffer) -> Result<AudioBuffer> {
    if buffer.sample_rate == TARGET_SAMPLE_RATE {
        return Ok(buffer.clone());
    }
    if buffer.samples.is_empty() {
        return Ok(AudioBuffer::new(Vec::new(), TARGET_SAMPLE_RATE));
    }

    let mut resampler =
        AudioResampler::new(buffer.sample_rate, TARGET_SAMPLE_RATE, RESAMPLER_CHUNK)?;
    let chunk = resampler.chunk_size();

    let mut padded = buffer.samples.clone();
    let remainder = padded.len() % chunk;
    if remainder != 0 {
        padded.resize(padded.len() + (chunk - remainder), 0.0);
    }

    let mut output = resampler.process(&padded)?;

    let expected = (buffer.samples.len() as u64 * TARGET_SAMPLE_RATE as u64)
        .div_ceil(buffer.sample_rate as u64) as usize;
    output.truncate(expected);

    Ok(AudioBuffer::new(output, TARGET_SAMPLE_RATE))
}

/// Resampler for converting audio between sample rates.
pub struct AudioResampler {
    resampler: Fft<f32>,
    chunk_size_in: usize,
    chunk_size_out: usize,
}

impl AudioResampler {
    /// Create a new resampler.
    ///
    /// # Arguments
    /// * `input_rate` - Input sample rate in Hz
    /// * `output_rate` - Output sample rate in Hz
    /// * `chunk_size` - Number of input samples per processing chunk
    pub fn new(input_rate: u32, output_rate: u32, chunk_size: usize) -> Result<Self> {
        let resampler = Fft::new(
            input_rate as usize,
            output_rate as usize,
            chunk_size,
            1, // sub_chunks
            1, // channels
            FixedSync::Input,
        )
        .context("Failed to create resampler")?;

        let chunk_size_out = resampler.output_frames_max();

        Ok(Self {
            resampler,
            chunk_size_in: chunk_size,
            chunk_size_out,
        })
    }

    /// Resample audio data. Input length must be a multiple of chunk_size.
    pub fn process(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let mut output = Vec::new();
        let input_chunks = input.chunks_exact(self.chunk_size_in);

        for chunk in input_chunks {
            let input_vecs = vec![chunk.to_vec()];
            let input_adapter =
                SequentialSliceOfVecs::new(&input_vecs, 1, chunk.len()).expect("valid input");
            let resampled = self
                .resampler
                .process(&input_adapter, 0, None)
                .context("Resampling failed")?;

            // Extract samples from the InterleavedOwned buffer
            for frame_idx in 0..resampled.frames() {
                output.push(resampled.read_sample(0, frame_idx).unwrap_or(0.0));
            }
        }

        Ok(output)
    }

    /// Get the required input chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size_in
    }

    /// Get the output chunk size for a given input chunk.
    pub fn output_chunk_size(&self) -> usize {
        self.chunk_size_out
    }
}

#[cfg(test)]
#[path = "audio_test.rs"]
mod tests;

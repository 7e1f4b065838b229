//! Caption segmentation.
//!
//! Re-chunks the variable-length spans produced by a transcription backend
//! into caption-length segments, preserving (or approximating) their time
//! alignment. The strategies are pure and deterministic: the same spans and
//! options always produce the same transcript.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod anchored;
mod passthrough;
mod uniform;
mod wrap;

pub use anchored::WordAnchored;
pub use passthrough::Passthrough;
pub use uniform::Uniform;
pub use wrap::wrap_words;

/// Default maximum characters per caption segment.
pub const DEFAULT_MAX_CHARS: usize = 120;

/// Default synthetic segment duration for [`Uniform`] segmentation, in seconds.
pub const DEFAULT_UNIFORM_UNIT_SECS: f64 = 10.0 / 60.0;

/// Timestamped chunk of text as produced by a transcription backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Text content of the span.
    pub text: String,
}

impl Span {
    /// Create a new span.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Timestamped, length-bounded chunk of text as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds, rounded to 2 decimal places.
    pub start: f64,
    /// End time in seconds, rounded to 2 decimal places.
    pub end: f64,
    /// Text content, at most `max_chars` characters unless it is a single
    /// word longer than the budget.
    pub text: String,
}

/// Full transcription result: the un-chunked text plus the ordered segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Space-joined concatenation of all span texts.
    pub text: String,
    /// Caption segments in temporal order of emission.
    pub segments: Vec<Segment>,
}

/// Segmentation strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentationMode {
    /// Subdivide long spans and interpolate timestamps from the span's own
    /// interval. Requires real per-span timing.
    #[default]
    WordAnchored,
    /// Concatenate everything, re-split by character budget, and synthesize
    /// evenly spaced timestamps. Degraded fallback when no fine timing exists.
    Uniform,
    /// Emit spans as segments unchanged, without enforcing the length bound.
    Passthrough,
}

/// Where [`WordAnchored`] searches for a sub-chunk when deriving its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorScope {
    /// Search within the originating span's own text. Offsets always fall
    /// inside the span's character range.
    #[default]
    Span,
    /// Search within the cumulative transcript accumulated so far. Matches
    /// earlier occurrences of recurring text and can place offsets outside
    /// the current span; only useful when that quirk is wanted.
    Transcript,
}

/// Options controlling segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Maximum characters per segment. Must be at least 1.
    pub max_chars: usize,
    /// Strategy used to produce segments.
    pub mode: SegmentationMode,
    /// Anchor search scope for word-anchored interpolation.
    pub anchor: AnchorScope,
    /// Synthetic per-segment duration for uniform mode, in seconds.
    pub uniform_unit_secs: f64,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            mode: SegmentationMode::default(),
            anchor: AnchorScope::default(),
            uniform_unit_secs: DEFAULT_UNIFORM_UNIT_SECS,
        }
    }
}

impl SegmentOptions {
    /// Validate the options before any processing happens.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.max_chars == 0 {
            return Err(SegmentError::InvalidMaxChars);
        }
        if !self.uniform_unit_secs.is_finite() || self.uniform_unit_secs <= 0.0 {
            return Err(SegmentError::InvalidUniformUnit(self.uniform_unit_secs));
        }
        Ok(())
    }
}

/// Errors produced by the segmentation core.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    /// `max_chars` of 0 would either loop forever or emit empty segments.
    #[error("max_chars must be at least 1")]
    InvalidMaxChars,
    /// Uniform segment duration must be a positive, finite number of seconds.
    #[error("uniform segment duration must be finite and positive, got {0}")]
    InvalidUniformUnit(f64),
    /// A span carried a NaN or infinite timestamp.
    #[error("span {index} has a non-finite timestamp (start={start}, end={end})")]
    NonFiniteTimestamp { index: usize, start: f64, end: f64 },
}

/// Strategy interface for converting spans into a transcript.
pub trait SegmentationStrategy: Send + Sync {
    /// Segment the given spans according to the options.
    ///
    /// Options are validated by the caller ([`segment_spans`]); strategies
    /// may assume `max_chars >= 1`.
    fn segment(&self, spans: &[Span], opts: &SegmentOptions) -> Result<Transcript, SegmentError>;
}

/// Build the strategy implementation for the given options.
pub fn strategy_for(opts: &SegmentOptions) -> Box<dyn SegmentationStrategy> {
    match opts.mode {
        SegmentationMode::WordAnchored => Box::new(WordAnchored::new(opts.anchor)),
        SegmentationMode::Uniform => Box::new(Uniform),
        SegmentationMode::Passthrough => Box::new(Passthrough),
    }
}

/// Segment engine spans into a caption transcript.
///
/// Empty input (no spans, or only whitespace text) is not an error and
/// yields an empty transcript.
pub fn segment_spans(spans: &[Span], opts: &SegmentOptions) -> Result<Transcript, SegmentError> {
    opts.validate()?;
    strategy_for(opts).segment(spans, opts)
}

/// Round a timestamp to 2 decimal places for emission.
pub(crate) fn round2(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Character count of a string (not bytes).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Normalize raw spans: trim text, drop empty spans, reject non-finite
/// timestamps, and clamp reversed intervals to zero duration.
pub(crate) fn clean_spans(spans: &[Span]) -> Result<Vec<Span>, SegmentError> {
    let mut cleaned = Vec::with_capacity(spans.len());
    for (index, span) in spans.iter().enumerate() {
        if !span.start.is_finite() || !span.end.is_finite() {
            return Err(SegmentError::NonFiniteTimestamp {
                index,
                start: span.start,
                end: span.end,
            });
        }
        let text = span.text.trim();
        if text.is_empty() {
            continue;
        }
        let end = if span.end < span.start {
            tracing::debug!(
                index = index,
                start = span.start,
                end = span.end,
                "Clamping reversed span interval"
            );
            span.start
        } else {
            span.end
        };
        cleaned.push(Span::new(span.start, end, text));
    }
    Ok(cleaned)
}

/// Join span texts with single spaces into the full transcript text.
pub(crate) fn join_span_texts(spans: &[Span]) -> String {
    let mut text = String::new();
    for span in spans {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&span.text);
    }
    text
}

#[cfg(test)]
#[path = "segment_test.rs"]
mod tests;

//! Uniform-approximation segmentation.

use super::wrap::wrap_words;
use super::{
    Segment, SegmentError, SegmentOptions, SegmentationStrategy, Span, Transcript, clean_spans,
    join_span_texts, round2,
};

/// Fallback strategy for input without usable per-span timing.
///
/// The whole transcript is concatenated and re-split by character budget;
/// chunk `i` is assigned the synthetic interval `[i * unit, (i + 1) * unit]`.
/// Timestamps are monotonic, non-overlapping and evenly spaced, but bear no
/// relation to when the words were actually spoken. Callers needing real
/// alignment should use [`super::WordAnchored`].
pub struct Uniform;

impl SegmentationStrategy for Uniform {
    fn segment(&self, spans: &[Span], opts: &SegmentOptions) -> Result<Transcript, SegmentError> {
        let spans = clean_spans(spans)?;
        let full_text = join_span_texts(&spans);

        let segments = wrap_words(&full_text, opts.max_chars)
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| Segment {
                start: round2(i as f64 * opts.uniform_unit_secs),
                end: round2((i + 1) as f64 * opts.uniform_unit_secs),
                text: chunk,
            })
            .collect();

        Ok(Transcript {
            text: full_text,
            segments,
        })
    }
}

//! Direct pass-through segmentation.

use super::{
    Segment, SegmentError, SegmentOptions, SegmentationStrategy, Span, Transcript, clean_spans,
    join_span_texts, round2,
};

/// Strategy that emits each span as a segment unchanged.
///
/// The character budget is not enforced; segments are exactly the engine's
/// spans with rounded timestamps. Useful when the backend already produces
/// caption-sized output.
pub struct Passthrough;

impl SegmentationStrategy for Passthrough {
    fn segment(&self, spans: &[Span], _opts: &SegmentOptions) -> Result<Transcript, SegmentError> {
        let spans = clean_spans(spans)?;
        let full_text = join_span_texts(&spans);

        let segments = spans
            .into_iter()
            .map(|span| Segment {
                start: round2(span.start),
                end: round2(span.end),
                text: span.text,
            })
            .collect();

        Ok(Transcript {
            text: full_text,
            segments,
        })
    }
}

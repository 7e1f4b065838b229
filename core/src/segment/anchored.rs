//! Word-anchored segmentation with timestamp interpolation.

use tracing::trace;

use super::wrap::wrap_words;
use super::{
    AnchorScope, Segment, SegmentError, SegmentOptions, SegmentationStrategy, Span, Transcript,
    char_len, clean_spans, round2,
};

/// Segmentation strategy that keeps short spans as-is and subdivides long
/// spans, deriving sub-segment timestamps from the span's own interval.
///
/// For an over-long span, time is distributed linearly across its characters:
/// `time_per_char = (end - start) / char_len(text)`. Each wrapped chunk is
/// anchored at the first occurrence of its text within the anchor scope, and
/// its interval is `[start + offset * tpc, start + (offset + len) * tpc]`.
pub struct WordAnchored {
    anchor: AnchorScope,
}

impl WordAnchored {
    /// Create a strategy with the given anchor scope.
    pub fn new(anchor: AnchorScope) -> Self {
        Self { anchor }
    }
}

impl SegmentationStrategy for WordAnchored {
    fn segment(&self, spans: &[Span], opts: &SegmentOptions) -> Result<Transcript, SegmentError> {
        let spans = clean_spans(spans)?;
        let mut full_text = String::new();
        let mut segments = Vec::new();

        for span in &spans {
            if !full_text.is_empty() {
                full_text.push(' ');
            }
            full_text.push_str(&span.text);

            let text_len = char_len(&span.text);
            if text_len <= opts.max_chars {
                segments.push(Segment {
                    start: round2(span.start),
                    end: round2(span.end),
                    text: span.text.clone(),
                });
                continue;
            }

            // text_len > max_chars >= 1, so never zero here.
            let time_per_char = (span.end - span.start) / text_len as f64;

            for chunk in wrap_words(&span.text, opts.max_chars) {
                let haystack = match self.anchor {
                    AnchorScope::Span => span.text.as_str(),
                    AnchorScope::Transcript => full_text.as_str(),
                };
                // An unmatched chunk (possible when the span text carries
                // irregular whitespace) falls back to the span start.
                let offset = char_offset_of(haystack, &chunk).unwrap_or(0);
                let start = span.start + offset as f64 * time_per_char;
                let end = start + char_len(&chunk) as f64 * time_per_char;

                trace!(
                    offset = offset,
                    start = start,
                    end = end,
                    chunk_chars = char_len(&chunk),
                    "Interpolated sub-segment"
                );

                segments.push(Segment {
                    start: round2(start),
                    end: round2(end),
                    text: chunk,
                });
            }
        }

        Ok(Transcript {
            text: full_text,
            segments,
        })
    }
}

/// First occurrence of `needle` in `haystack`, as a character offset.
fn char_offset_of(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

#[cfg(test)]
#[path = "anchored_test.rs"]
mod tests;

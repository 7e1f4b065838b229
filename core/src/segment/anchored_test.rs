use super::*;
use crate::segment::SegmentationMode;

fn opts(max_chars: usize) -> SegmentOptions {
    SegmentOptions {
        max_chars,
        mode: SegmentationMode::WordAnchored,
        ..Default::default()
    }
}

#[test]
fn short_span_passes_through_with_its_own_timestamps() {
    let spans = vec![Span::new(0.0, 2.0, "hello world")];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(120))
        .unwrap();

    assert_eq!(transcript.text, "hello world");
    assert_eq!(
        transcript.segments,
        vec![Segment {
            start: 0.0,
            end: 2.0,
            text: "hello world".to_string(),
        }]
    );
}

#[test]
fn timestamps_are_rounded_to_two_decimals() {
    let spans = vec![Span::new(1.23456, 2.98765, "short")];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(120))
        .unwrap();

    assert_eq!(transcript.segments[0].start, 1.23);
    assert_eq!(transcript.segments[0].end, 2.99);
}

#[test]
fn long_span_is_subdivided_within_its_own_interval() {
    // 63 distinct 3-char words: 251 characters in total.
    let text = (0..63)
        .map(|i| format!("w{i:02}"))
        .collect::<Vec<_>>()
        .join(" ");
    let spans = vec![Span::new(0.0, 10.0, text)];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(120))
        .unwrap();

    assert_eq!(transcript.segments.len(), 3);
    for segment in &transcript.segments {
        assert!(segment.text.chars().count() <= 120);
        assert!(segment.start >= 0.0);
        assert!(segment.end <= 10.0);
        assert!(segment.start <= segment.end);
    }
    for pair in transcript.segments.windows(2) {
        assert!(pair[0].start < pair[1].start, "starts must increase");
    }
}

#[test]
fn interpolation_distributes_time_per_character() {
    // 14 chars over 10 seconds: time_per_char = 10/14.
    let spans = vec![Span::new(10.0, 20.0, "aaaa bbbb cccc")];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(10))
        .unwrap();

    assert_eq!(transcript.segments.len(), 2);
    assert_eq!(transcript.segments[0].text, "aaaa bbbb");
    assert_eq!(transcript.segments[0].start, 10.0);
    assert_eq!(transcript.segments[0].end, 16.43);
    assert_eq!(transcript.segments[1].text, "cccc");
    assert_eq!(transcript.segments[1].start, 17.14);
    assert_eq!(transcript.segments[1].end, 20.0);
}

#[test]
fn span_scope_anchors_later_spans_inside_their_own_range() {
    let spans = vec![
        Span::new(0.0, 1.0, "intro"),
        Span::new(10.0, 20.0, "aaaa bbbb cccc"),
    ];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(10))
        .unwrap();

    assert_eq!(transcript.text, "intro aaaa bbbb cccc");
    // The second span's sub-segments stay inside [10, 20] regardless of
    // what came before it.
    assert_eq!(transcript.segments[1].start, 10.0);
    for segment in &transcript.segments[1..] {
        assert!(segment.start >= 10.0 && segment.end <= 20.0);
    }
}

#[test]
fn transcript_scope_reproduces_cumulative_offset_shift() {
    let spans = vec![
        Span::new(0.0, 1.0, "intro"),
        Span::new(10.0, 20.0, "aaaa bbbb cccc"),
    ];

    let transcript = WordAnchored::new(AnchorScope::Transcript)
        .segment(&spans, &opts(10))
        .unwrap();

    // "aaaa bbbb" sits at char offset 6 of "intro aaaa bbbb cccc", so the
    // first sub-segment is shifted past the span start and its end lands
    // beyond the span interval.
    assert_eq!(transcript.segments[1].start, 14.29);
    assert_eq!(transcript.segments[1].end, 20.71);
}

#[test]
fn repeated_chunks_all_anchor_to_first_occurrence() {
    let text = "word ".repeat(50).trim().to_string();
    let spans = vec![Span::new(0.0, 10.0, text.clone())];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(10))
        .unwrap();

    assert_eq!(transcript.segments.len(), 25);
    for segment in &transcript.segments {
        assert_eq!(segment.text, "word word");
        // Every chunk matches at offset 0, so all share the same interval.
        assert_eq!(segment.start, 0.0);
        assert!(segment.start <= segment.end);
    }
    let joined = transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, text);
}

#[test]
fn zero_duration_span_produces_zero_duration_chunks() {
    let spans = vec![Span::new(5.0, 5.0, "aaaa bbbb cccc")];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(10))
        .unwrap();

    for segment in &transcript.segments {
        assert_eq!(segment.start, 5.0);
        assert_eq!(segment.end, 5.0);
    }
}

#[test]
fn multibyte_text_interpolates_by_char_count() {
    // 13 chars, all two bytes each in UTF-8.
    let spans = vec![Span::new(0.0, 13.0, "ääää öööö üüü")];

    let transcript = WordAnchored::new(AnchorScope::Span)
        .segment(&spans, &opts(9))
        .unwrap();

    assert_eq!(transcript.segments.len(), 2);
    assert_eq!(transcript.segments[0].text, "ääää öööö");
    assert_eq!(transcript.segments[0].start, 0.0);
    assert_eq!(transcript.segments[0].end, 9.0);
    assert_eq!(transcript.segments[1].text, "üüü");
    assert_eq!(transcript.segments[1].start, 10.0);
    assert_eq!(transcript.segments[1].end, 13.0);
}

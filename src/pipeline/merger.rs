//! Absorbs short trailing fragments into the preceding cue.

use crate::pipeline::types::Segment;

/// Merge segments with fewer than `min_words` words into their predecessor
/// when the pause between them is shorter than `max_pause` seconds.
///
/// The first segment is never merged. Merging chains: a fused segment can
/// absorb the next short fragment as well.
pub fn merge(segments: Vec<Segment>, min_words: usize, max_pause: f64) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.word_count() < min_words
            && let Some(previous) = merged.last_mut()
            && segment.start - previous.end < max_pause
        {
            let head = previous.text.trim_end().len();
            previous.text.truncate(head);
            previous.text.push(' ');
            previous.text.push_str(segment.text.trim_start());
            previous.end = segment.end;
            continue;
        }
        merged.push(segment);
    }

    merged
}

//! Speaker labeling by maximum temporal overlap with diarization intervals.

use crate::defaults::UNKNOWN_SPEAKER;
use crate::pipeline::types::{Segment, SpeakerSegment};

/// Length of the intersection of two intervals. Negative when disjoint.
pub fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    a_end.min(b_end) - a_start.max(b_start)
}

/// Pick the speaker whose interval overlaps `[start, end]` the most.
///
/// Only strictly positive overlaps count, and only a strictly greater overlap
/// replaces the current best, so the first-listed speaker wins ties.
pub fn best_speaker<'a>(start: f64, end: f64, speakers: &'a [SpeakerSegment]) -> Option<&'a str> {
    let mut best: Option<(f64, &str)> = None;
    for spk in speakers {
        let amount = overlap(start, end, spk.start, spk.end);
        if amount > 0.0 && best.is_none_or(|(max, _)| amount > max) {
            best = Some((amount, spk.speaker.as_str()));
        }
    }
    best.map(|(_, label)| label)
}

/// Label every segment with its best-overlapping speaker, or `"Unknown"`.
pub fn assign(mut segments: Vec<Segment>, speakers: &[SpeakerSegment]) -> Vec<Segment> {
    for segment in &mut segments {
        let label = best_speaker(segment.start, segment.end, speakers).unwrap_or(UNKNOWN_SPEAKER);
        segment.speaker = Some(label.to_string());
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_largest_overlap() {
        let speakers = vec![
            SpeakerSegment::new(0.0, 1.5, "spk0"),
            SpeakerSegment::new(1.5, 4.0, "spk1"),
        ];
        let labeled = assign(vec![Segment::new(1.0, 3.0, "who said this")], &speakers);
        assert_eq!(labeled[0].speaker.as_deref(), Some("spk1"));
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let speakers = vec![
            SpeakerSegment::new(0.0, 1.0, "spk1"),
            SpeakerSegment::new(1.0, 2.0, "spk0"),
        ];
        let labeled = assign(vec![Segment::new(0.5, 1.5, "split evenly")], &speakers);
        assert_eq!(labeled[0].speaker.as_deref(), Some("spk1"));
    }

    #[test]
    fn test_no_overlap_is_unknown() {
        let speakers = vec![SpeakerSegment::new(5.0, 6.0, "spk0")];
        let labeled = assign(
            vec![
                Segment::new(0.0, 1.0, "before anyone"),
                // Touching intervals have zero overlap
                Segment::new(4.0, 5.0, "right before"),
            ],
            &speakers,
        );
        assert_eq!(labeled[0].speaker.as_deref(), Some("Unknown"));
        assert_eq!(labeled[1].speaker.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_empty_diarization_labels_unknown() {
        let labeled = assign(vec![Segment::new(0.0, 1.0, "alone")], &[]);
        assert_eq!(labeled[0].speaker.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_overwrites_existing_label() {
        let speakers = vec![SpeakerSegment::new(0.0, 2.0, "spk3")];
        let labeled = assign(
            vec![Segment::new(0.0, 1.0, "relabel me").with_speaker("old")],
            &speakers,
        );
        assert_eq!(labeled[0].speaker.as_deref(), Some("spk3"));
    }

    #[test]
    fn test_zero_length_segment_is_unknown() {
        let speakers = vec![SpeakerSegment::new(0.0, 2.0, "spk0")];
        let labeled = assign(vec![Segment::new(1.0, 1.0, "instant")], &speakers);
        assert_eq!(labeled[0].speaker.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_times_and_text_unchanged() {
        let speakers = vec![SpeakerSegment::new(0.0, 2.0, "spk0")];
        let input = vec![Segment::new(0.25, 1.75, "keep me")];
        let labeled = assign(input.clone(), &speakers);
        assert_eq!(labeled[0].start, input[0].start);
        assert_eq!(labeled[0].end, input[0].end);
        assert_eq!(labeled[0].text, input[0].text);
    }
}

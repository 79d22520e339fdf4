//! Collapses long runs of identical consecutive segments into one cue.
//!
//! Recognizers stuck in a loop can emit the same phrase dozens of times in a
//! row. A run of at least `threshold` identical (trimmed) texts becomes a
//! single cue spanning the whole run; shorter runs pass through untouched.

use crate::pipeline::types::Segment;

/// Stack runs of identical text of length `>= threshold`.
pub fn stack(segments: Vec<Segment>, threshold: usize) -> Vec<Segment> {
    let mut stacked = Vec::with_capacity(segments.len());
    let mut run: Vec<Segment> = Vec::new();

    for segment in segments {
        let continues_run = run
            .first()
            .is_some_and(|first| first.text.trim() == segment.text.trim());
        if !continues_run {
            flush_run(&mut run, threshold, &mut stacked);
        }
        run.push(segment);
    }
    flush_run(&mut run, threshold, &mut stacked);

    stacked
}

fn flush_run(run: &mut Vec<Segment>, threshold: usize, out: &mut Vec<Segment>) {
    if run.is_empty() {
        return;
    }
    if run.len() >= threshold {
        let mut drained = run.drain(..);
        // Non-empty: checked above
        if let Some(first) = drained.next() {
            let end = drained.last().map_or(first.end, |last| last.end);
            out.push(Segment {
                end,
                text: first.text.trim().to_string(),
                ..first
            });
        }
    } else {
        out.append(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::STACK_THRESHOLD;
    use crate::pipeline::types::is_ordered;

    fn run_of(text: &str, count: usize) -> Vec<Segment> {
        (0..count)
            .map(|i| Segment::new(i as f64, (i + 1) as f64, text))
            .collect()
    }

    #[test]
    fn test_five_identical_segments_stack() {
        let stacked = stack(run_of("эм", 5), STACK_THRESHOLD);
        assert_eq!(stacked, vec![Segment::new(0.0, 5.0, "эм")]);
    }

    #[test]
    fn test_four_identical_segments_do_not_stack() {
        let input = run_of("эм", 4);
        let stacked = stack(input.clone(), STACK_THRESHOLD);
        assert_eq!(stacked, input);
    }

    #[test]
    fn test_comparison_uses_trimmed_text() {
        let input = vec![
            Segment::new(0.0, 1.0, " да"),
            Segment::new(1.0, 2.0, "да "),
            Segment::new(2.0, 3.0, "да"),
        ];
        let stacked = stack(input, 3);
        assert_eq!(stacked, vec![Segment::new(0.0, 3.0, "да")]);
    }

    #[test]
    fn test_runs_between_other_segments() {
        let mut input = vec![Segment::new(0.0, 0.5, "intro line")];
        input.extend(
            (0..6).map(|i| Segment::new(1.0 + i as f64, 2.0 + i as f64, "loop loop")),
        );
        input.push(Segment::new(7.5, 8.0, "outro line"));
        input.push(Segment::new(8.0, 9.0, "outro line"));

        let stacked = stack(input, STACK_THRESHOLD);
        assert_eq!(
            stacked,
            vec![
                Segment::new(0.0, 0.5, "intro line"),
                Segment::new(1.0, 7.0, "loop loop"),
                Segment::new(7.5, 8.0, "outro line"),
                Segment::new(8.0, 9.0, "outro line"),
            ]
        );
        assert!(is_ordered(&stacked));
    }

    #[test]
    fn test_stacking_is_idempotent() {
        let mut input = run_of("again", 7);
        input.push(Segment::new(7.0, 8.0, "done now"));
        let once = stack(input, STACK_THRESHOLD);
        let twice = stack(once.clone(), STACK_THRESHOLD);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(stack(Vec::new(), STACK_THRESHOLD).is_empty());
    }
}

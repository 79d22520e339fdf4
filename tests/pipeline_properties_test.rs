//! Structural guarantees of the refinement pipeline over generated inputs.

use subclean::pipeline::types::is_ordered;
use subclean::pipeline::{
    HallucinationMarkers, LongSegmentSplitter, Pipeline, PipelineConfig, Segment, SpeakerSegment,
    TextNormalizer, merger, stacker,
};

const WORDS: &[&str] = &[
    "привет", "как", "дела", "хорошо", "спасибо", "сегодня", "погода", "отличная", "мы", "идём",
    "домой", "hello", "there", "world", "again", "-", "ну", "да", "эм", "конечно",
];

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn generate(seed: u64, count: usize) -> Vec<Segment> {
    let mut rng = Lcg(seed);
    let mut t = 0.0;
    let mut segments = Vec::with_capacity(count);
    let mut previous_text = String::new();

    for _ in 0..count {
        t += rng.below(20) as f64 / 10.0;
        let duration = rng.below(40) as f64 / 10.0;
        let text = if !previous_text.is_empty() && rng.below(4) == 0 {
            // Identical runs so stacking has something to do
            previous_text.clone()
        } else {
            let words = 1 + rng.below(25) as usize;
            let mut text: Vec<&str> = (0..words)
                .map(|_| WORDS[rng.below(WORDS.len() as u64) as usize])
                .collect();
            if rng.below(3) == 0 {
                text.push(".");
            }
            text.join(" ")
        };
        let prob = rng.below(100) as f64 / 100.0;
        segments.push(Segment::new(t, t + duration, text.clone()).with_no_speech_prob(prob));
        previous_text = text;
        t += duration;
    }
    segments
}

fn speakers() -> Vec<SpeakerSegment> {
    (0..40)
        .map(|i| SpeakerSegment::new(i as f64 * 5.0, i as f64 * 5.0 + 5.0, format!("spk{}", i % 3)))
        .collect()
}

#[test]
fn test_output_is_ordered_and_well_formed() {
    let config = PipelineConfig::default();
    // A terminator cut may run past max_chars by up to the window
    let longest = config.splitter.max_chars + config.splitter.window + 1;
    let pipeline = Pipeline::new(config, HallucinationMarkers::default());
    let speakers = speakers();
    for seed in 0..50 {
        let input = generate(seed, 60);
        let output = pipeline.run(input, Some(speakers.as_slice())).unwrap();

        assert!(is_ordered(&output.segments), "seed {seed}: unordered output");
        for seg in &output.segments {
            assert!(seg.start <= seg.end, "seed {seed}: inverted cue {seg:?}");
            assert!(!seg.text.trim().is_empty(), "seed {seed}: empty cue");
            assert!(seg.text.chars().count() <= longest, "seed {seed}: long cue {seg:?}");
            assert!(seg.speaker.is_some(), "seed {seed}: missing speaker");
        }
    }
}

#[test]
fn test_stacking_is_idempotent() {
    for seed in 0..50 {
        let once = stacker::stack(generate(seed, 80), 2);
        let twice = stacker::stack(once.clone(), 2);
        assert_eq!(once, twice, "seed {seed}");
    }
}

#[test]
fn test_merging_preserves_span() {
    for seed in 0..50 {
        let input = generate(seed, 40);
        let merged = merger::merge(input.clone(), 3, 1.0);

        assert!(merged.len() <= input.len());
        assert_eq!(merged.first().map(|s| s.start), input.first().map(|s| s.start));
        assert_eq!(merged.last().map(|s| s.end), input.last().map(|s| s.end));
        assert!(is_ordered(&merged));
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = TextNormalizer::default();
    for seed in 0..20 {
        let once = normalizer.normalize(generate(seed, 40));
        let twice = normalizer.normalize(once.clone());
        assert_eq!(once, twice, "seed {seed}");
    }
}

#[test]
fn test_split_covers_original_span() {
    let splitter = LongSegmentSplitter::default();
    for seed in 0..50 {
        for seg in generate(seed, 30) {
            let parts = splitter.split_segment(seg.clone());
            assert_eq!(parts.first().map(|s| s.start), Some(seg.start));
            assert_eq!(parts.last().map(|s| s.end), Some(seg.end));
            for pair in parts.windows(2) {
                assert!((pair[0].end - pair[1].start).abs() < 1e-9);
            }
            let before: String = seg.text.chars().filter(|c| !c.is_whitespace()).collect();
            let after: String = parts
                .iter()
                .flat_map(|p| p.text.chars())
                .filter(|c| !c.is_whitespace())
                .collect();
            assert_eq!(before, after, "seed {seed}");
        }
    }
}

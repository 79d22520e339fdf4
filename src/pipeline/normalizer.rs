//! Text normalization passes applied to every cue before splitting.

use crate::pipeline::types::Segment;

/// A pure text transformation applied to each cue.
pub trait TextPass: Send + Sync {
    /// Transform cue text. Must be idempotent.
    fn process(&self, text: &str) -> String;

    /// Name for diagnostics.
    fn name(&self) -> &'static str;
}

fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '—' | '–')
}

fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Strips dialogue dashes (hyphen, em dash, en dash) and surrounding
/// whitespace from the start of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingDashStripper;

impl TextPass for LeadingDashStripper {
    fn process(&self, text: &str) -> String {
        if !text.trim_start().starts_with(is_dash) {
            return text.to_string();
        }
        text.trim_start_matches(|c: char| c.is_whitespace() || is_dash(c))
            .to_string()
    }

    fn name(&self) -> &'static str {
        "leading-dash"
    }
}

/// Drops the final period of a single-sentence cue.
///
/// Cues ending in `!` or `?`, or holding a terminator before the final
/// character (several sentences, ellipses), are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingPeriodTrimmer;

impl TextPass for TrailingPeriodTrimmer {
    fn process(&self, text: &str) -> String {
        let trimmed = text.trim_end();
        match trimmed.strip_suffix('.') {
            Some(body) if !body.contains(is_sentence_terminator) => body.to_string(),
            _ => text.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "trailing-period"
    }
}

/// Chain of text passes run over every segment.
pub struct TextNormalizer {
    passes: Vec<Box<dyn TextPass>>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(vec![
            Box::new(LeadingDashStripper),
            Box::new(TrailingPeriodTrimmer),
        ])
    }
}

impl TextNormalizer {
    pub fn new(passes: Vec<Box<dyn TextPass>>) -> Self {
        Self { passes }
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Apply every pass to one text.
    pub fn normalize_text(&self, text: &str) -> String {
        self.passes
            .iter()
            .fold(text.to_string(), |acc, pass| pass.process(&acc))
    }

    /// Normalize every segment. Segments left with no text are dropped.
    pub fn normalize(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .filter_map(|segment| {
                let text = self.normalize_text(&segment.text);
                if text.trim().is_empty() {
                    None
                } else {
                    Some(Segment { text, ..segment })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_and_period_removed() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize_text("- hello world."), "hello world");
    }

    #[test]
    fn test_all_dash_kinds_stripped() {
        let pass = LeadingDashStripper;
        assert_eq!(pass.process("— Да, конечно"), "Да, конечно");
        assert_eq!(pass.process("  – – ну"), "ну");
        assert_eq!(pass.process("--and so"), "and so");
    }

    #[test]
    fn test_inner_dashes_kept() {
        let pass = LeadingDashStripper;
        assert_eq!(pass.process("well - maybe"), "well - maybe");
        assert_eq!(pass.process("  no dash "), "  no dash ");
    }

    #[test]
    fn test_period_kept_for_multiple_sentences() {
        let pass = TrailingPeriodTrimmer;
        assert_eq!(pass.process("First one. Second one."), "First one. Second one.");
        assert_eq!(pass.process("Really? Yes."), "Really? Yes.");
        assert_eq!(pass.process("Hmm..."), "Hmm...");
    }

    #[test]
    fn test_question_and_exclamation_untouched() {
        let pass = TrailingPeriodTrimmer;
        assert_eq!(pass.process("Are you there?"), "Are you there?");
        assert_eq!(pass.process("Stop!"), "Stop!");
    }

    #[test]
    fn test_trailing_whitespace_after_period() {
        let pass = TrailingPeriodTrimmer;
        assert_eq!(pass.process("Just one sentence. "), "Just one sentence");
    }

    #[test]
    fn test_passes_are_idempotent() {
        let normalizer = TextNormalizer::default();
        for text in ["- hello world.", "— Hmm...", "One. Two.", "plain", "-."] {
            let once = normalizer.normalize_text(text);
            assert_eq!(normalizer.normalize_text(&once), once, "input: {text:?}");
        }
    }

    #[test]
    fn test_pass_order_does_not_matter() {
        let forward = TextNormalizer::default();
        let reverse = TextNormalizer::new(vec![
            Box::new(TrailingPeriodTrimmer),
            Box::new(LeadingDashStripper),
        ]);
        for text in ["- hello world.", "–Yes. No.", "- ok?", "-."] {
            assert_eq!(forward.normalize_text(text), reverse.normalize_text(text));
        }
    }

    #[test]
    fn test_normalize_drops_cues_left_empty() {
        let normalizer = TextNormalizer::default();
        let out = normalizer.normalize(vec![
            Segment::new(0.0, 1.0, "- ."),
            Segment::new(1.0, 2.0, "- kept line."),
        ]);
        assert_eq!(out, vec![Segment::new(1.0, 2.0, "kept line")]);
    }

    #[test]
    fn test_pass_names() {
        assert_eq!(
            TextNormalizer::default().pass_names(),
            vec!["leading-dash", "trailing-period"]
        );
    }
}

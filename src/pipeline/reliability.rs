//! Reliability filtering: drops segments the recognizer most likely invented.
//!
//! A segment is dropped when its text is empty, too short, flagged as
//! non-speech, or repetitive (a recognizer loop). Survivors are scrubbed of
//! hallucination markers; a segment that is nothing but markers is dropped too.

use crate::config::FilterConfig;
use crate::defaults;
use crate::pipeline::markers::HallucinationMarkers;
use crate::pipeline::types::{RepetitionEntry, Segment};
use std::collections::HashMap;
use std::fmt;

/// Why a segment was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Empty,
    Repetitive,
    NoSpeech,
    TooShort,
    Hallucination,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DropReason::Empty => "empty",
            DropReason::Repetitive => "repetitive",
            DropReason::NoSpeech => "no speech",
            DropReason::TooShort => "too short",
            DropReason::Hallucination => "hallucination marker",
        };
        f.write_str(label)
    }
}

/// A segment removed by the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedSegment {
    pub segment: Segment,
    pub reason: DropReason,
}

/// Result of running the reliability filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Surviving segments with trimmed, marker-free text.
    pub kept: Vec<Segment>,
    /// Every dropped segment in input order.
    pub dropped: Vec<DroppedSegment>,
}

impl FilterOutcome {
    /// Dropped repetitive segments, in input order, for the repetition log.
    pub fn repetitions(&self) -> Vec<RepetitionEntry> {
        self.dropped
            .iter()
            .filter(|d| d.reason == DropReason::Repetitive)
            .map(|d| RepetitionEntry {
                start: d.segment.start,
                text: d.segment.text.trim().to_string(),
            })
            .collect()
    }
}

/// Word tokens: maximal runs of alphanumerics and underscores, lowercased.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns true if the text looks like a recognizer loop.
///
/// Repetitive when the share of distinct tokens is below `unique_ratio`, or
/// when a single token occurs more than `max_repeat` times. Text without any
/// word tokens is never repetitive.
pub fn is_repetitive(text: &str, unique_ratio: f64, max_repeat: usize) -> bool {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return false;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token.as_str()).or_default() += 1;
    }

    let ratio = counts.len() as f64 / tokens.len() as f64;
    ratio < unique_ratio || counts.values().any(|&n| n > max_repeat)
}

/// Settings for the reliability check.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilityFilter {
    pub no_speech_threshold: f64,
    pub min_chars: usize,
    pub unique_ratio: f64,
    pub max_repeat: usize,
}

impl Default for ReliabilityFilter {
    fn default() -> Self {
        Self {
            no_speech_threshold: defaults::NO_SPEECH_THRESHOLD,
            min_chars: defaults::MIN_TEXT_CHARS,
            unique_ratio: defaults::UNIQUE_TOKEN_RATIO,
            max_repeat: defaults::MAX_TOKEN_REPEAT,
        }
    }
}

impl From<&FilterConfig> for ReliabilityFilter {
    fn from(config: &FilterConfig) -> Self {
        Self {
            no_speech_threshold: config.no_speech_threshold,
            min_chars: config.min_chars,
            unique_ratio: config.unique_ratio,
            max_repeat: config.max_repeat,
        }
    }
}

impl ReliabilityFilter {
    /// Classify a segment. Returns the drop reason, or `None` if it is reliable.
    ///
    /// Repetitiveness is checked before the confidence and length checks so that
    /// every repetitive drop ends up in the repetition log.
    pub fn unreliable_reason(&self, segment: &Segment) -> Option<DropReason> {
        let text = segment.text.trim();
        if text.is_empty() {
            Some(DropReason::Empty)
        } else if is_repetitive(text, self.unique_ratio, self.max_repeat) {
            Some(DropReason::Repetitive)
        } else if segment.no_speech_prob.unwrap_or(0.0) > self.no_speech_threshold {
            Some(DropReason::NoSpeech)
        } else if text.chars().count() < self.min_chars {
            Some(DropReason::TooShort)
        } else {
            None
        }
    }

    /// Run the filter over a segment sequence.
    pub fn filter(&self, segments: Vec<Segment>, markers: &HallucinationMarkers) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for segment in segments {
            if let Some(reason) = self.unreliable_reason(&segment) {
                outcome.dropped.push(DroppedSegment { segment, reason });
                continue;
            }

            let mut text = segment.text.trim().to_string();
            if markers.matches(&text) {
                let cleaned = markers.strip(&text);
                if cleaned.is_empty() {
                    outcome.dropped.push(DroppedSegment {
                        segment,
                        reason: DropReason::Hallucination,
                    });
                    continue;
                }
                text = cleaned;
            }

            outcome.kept.push(Segment { text, ..segment });
        }

        outcome
    }
}

//! Splits oversized cues into several timed sub-cues.
//!
//! Cut points prefer a sentence terminator near the length limit, then the last
//! whitespace before it, then a hard cut. The original time span is divided
//! into equal slices, one per part, regardless of each part's length.

use crate::config::SplitConfig;
use crate::defaults;
use crate::pipeline::types::Segment;

fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongSegmentSplitter {
    /// Longest cue text (in characters) that passes through unsplit.
    pub max_chars: usize,
    /// Half-width of the terminator search window around `max_chars`.
    pub window: usize,
}

impl Default for LongSegmentSplitter {
    fn default() -> Self {
        Self {
            max_chars: defaults::SPLIT_MAX_CHARS,
            window: defaults::SPLIT_WINDOW,
        }
    }
}

impl From<&SplitConfig> for LongSegmentSplitter {
    fn from(config: &SplitConfig) -> Self {
        Self {
            max_chars: config.max_chars,
            window: config.window,
        }
    }
}

impl LongSegmentSplitter {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::default()
        }
    }

    /// Index just past the cut for a text longer than `max_chars`.
    fn cut_position(&self, chars: &[char]) -> usize {
        let lo = self.max_chars.saturating_sub(self.window);
        let hi = (self.max_chars + self.window).min(chars.len() - 1);
        if let Some(i) = (lo..=hi).find(|&i| is_sentence_terminator(chars[i])) {
            return i + 1;
        }

        let limit = self.max_chars.min(chars.len() - 1);
        match (1..=limit).rev().find(|&i| chars[i].is_whitespace()) {
            Some(i) => i,
            // Every cut must consume at least one character
            None => self.max_chars.max(1),
        }
    }

    /// Break text into parts. Text within the limit comes back as one part.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.trim().chars().collect();
        let mut parts = Vec::new();
        let mut rest: &[char] = &chars;

        while rest.len() > self.max_chars {
            let cut = self.cut_position(rest);
            let part: String = rest[..cut].iter().collect();
            let part = part.trim();
            if !part.is_empty() {
                parts.push(part.to_string());
            }
            rest = &rest[cut..];
            let skip = rest.iter().take_while(|c| c.is_whitespace()).count();
            rest = &rest[skip..];
        }

        let tail: String = rest.iter().collect();
        let tail = tail.trim();
        if !tail.is_empty() {
            parts.push(tail.to_string());
        }
        parts
    }

    /// Split one segment into equal-duration parts.
    pub fn split_segment(&self, segment: Segment) -> Vec<Segment> {
        if segment.text.trim().chars().count() <= self.max_chars {
            return vec![segment];
        }

        let parts = self.split_text(&segment.text);
        let count = parts.len();
        let slice = segment.duration() / count as f64;

        parts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let start = segment.start + slice * i as f64;
                let end = if i + 1 == count {
                    segment.end
                } else {
                    segment.start + slice * (i + 1) as f64
                };
                Segment {
                    start,
                    end,
                    text,
                    ..segment.clone()
                }
            })
            .collect()
    }

    /// Split every oversized segment in the sequence.
    pub fn split(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .flat_map(|segment| self.split_segment(segment))
            .collect()
    }
}

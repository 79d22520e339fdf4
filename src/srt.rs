//! SRT subtitle and repetition log output.
//!
//! Cue layout: index line, `HH:MM:SS,mmm --> HH:MM:SS,mmm`, wrapped text,
//! blank line. Milliseconds are truncated, never rounded.

use crate::config::OutputConfig;
use crate::defaults;
use crate::error::Result;
use crate::pipeline::types::{RepetitionEntry, Segment};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Negative input renders as zero.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc();
    let millis = ((seconds - whole) * 1000.0) as u64;
    let total = whole as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Greedy word wrap to `width` characters per line.
///
/// Whitespace runs collapse to single spaces. Words longer than `width` are
/// broken across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if line_len == 0 {
                word.len()
            } else {
                line_len + 1 + word.len()
            };
            if needed <= width {
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(word.iter());
                line_len += word.len();
                break;
            }

            if word.len() > width {
                // Fill what is left of the current line with the head of the word
                let room = if line_len == 0 {
                    width
                } else {
                    width.saturating_sub(line_len + 1)
                };
                if room > 0 {
                    if line_len > 0 {
                        line.push(' ');
                    }
                    line.extend(word.drain(..room));
                }
            }
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render one cue, 1-indexed.
pub fn render_cue(index: usize, segment: &Segment, wrap_width: usize, speaker_labels: bool) -> String {
    let text = match (&segment.speaker, speaker_labels) {
        (Some(speaker), true) if !segment.text.trim().is_empty() => {
            format!("[{speaker}] {}", segment.text)
        }
        _ => segment.text.clone(),
    };
    format!(
        "{index}\n{} --> {}\n{}\n\n",
        format_timestamp(segment.start),
        format_timestamp(segment.end),
        wrap_text(&text, wrap_width).join("\n")
    )
}

/// Serializes cues to SRT.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleWriter {
    pub wrap_width: usize,
    pub speaker_labels: bool,
}

impl Default for SubtitleWriter {
    fn default() -> Self {
        Self {
            wrap_width: defaults::WRAP_WIDTH,
            speaker_labels: false,
        }
    }
}

impl From<&OutputConfig> for SubtitleWriter {
    fn from(config: &OutputConfig) -> Self {
        Self {
            wrap_width: config.wrap_width,
            speaker_labels: config.speaker_labels,
        }
    }
}

impl SubtitleWriter {
    pub fn render(&self, segments: &[Segment]) -> String {
        segments
            .iter()
            .enumerate()
            .map(|(i, seg)| render_cue(i + 1, seg, self.wrap_width, self.speaker_labels))
            .collect()
    }

    /// Write cues to `path`, replacing any existing file.
    pub fn write(&self, path: &Path, segments: &[Segment]) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (i, seg) in segments.iter().enumerate() {
            out.write_all(render_cue(i + 1, seg, self.wrap_width, self.speaker_labels).as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Render repetition log entries: `[HH:MM:SS,mmm] text` followed by a blank line.
pub fn render_repetition_log(entries: &[RepetitionEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("[{}] {}\n\n", format_timestamp(e.start), e.text))
        .collect()
}

/// Write the repetition log. The file is created even when there are no entries.
pub fn write_repetition_log(path: &Path, entries: &[RepetitionEntry]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(render_repetition_log(entries).as_bytes())?;
    out.flush()?;
    Ok(())
}

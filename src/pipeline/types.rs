//! Data types flowing through the refinement pipeline.

use crate::error::{Result, SubcleanError};
use serde::{Deserialize, Serialize};

/// One subtitle cue candidate.
///
/// Times are seconds from the start of the media. `start <= end` always holds;
/// zero-length cues are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Recognizer confidence that the span contains no speech. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_speech_prob: Option<f64>,
    /// Diarization label, set by the speaker assigner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Segment {
    /// Creates a segment without confidence or speaker information.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            no_speech_prob: None,
            speaker: None,
        }
    }

    /// Sets the recognizer no-speech probability.
    pub fn with_no_speech_prob(mut self, prob: f64) -> Self {
        self.no_speech_prob = Some(prob);
        self
    }

    /// Sets the speaker label.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A speaker-attributed interval produced by an external diarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
}

impl SpeakerSegment {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>) -> Self {
        Self {
            start,
            end,
            speaker: speaker.into(),
        }
    }
}

/// A discarded repetitive segment, kept for the repetition log.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionEntry {
    pub start: f64,
    pub text: String,
}

/// Returns true when segments are sorted by non-decreasing start time.
pub fn is_ordered(segments: &[Segment]) -> bool {
    segments.windows(2).all(|pair| pair[0].start <= pair[1].start)
}

fn check_bounds(kind: &str, index: usize, start: f64, end: f64) -> Result<()> {
    let violation = if !start.is_finite() || !end.is_finite() {
        Some(format!("{kind} {index}: times must be finite"))
    } else if start < 0.0 {
        Some(format!("{kind} {index}: start {start} is negative"))
    } else if start > end {
        Some(format!("{kind} {index}: start {start} is after end {end}"))
    } else {
        None
    };
    match violation {
        Some(message) => Err(SubcleanError::InputContract { message }),
        None => Ok(()),
    }
}

/// Check recognizer segments: finite, non-negative, `start <= end`, sorted by start.
pub fn validate_segments(segments: &[Segment]) -> Result<()> {
    for (index, segment) in segments.iter().enumerate() {
        check_bounds("segment", index, segment.start, segment.end)?;
        if let Some(prob) = segment.no_speech_prob
            && !(0.0..=1.0).contains(&prob)
        {
            return Err(SubcleanError::InputContract {
                message: format!("segment {index}: no_speech_prob {prob} outside [0, 1]"),
            });
        }
    }
    if let Some(index) = segments
        .windows(2)
        .position(|pair| pair[0].start > pair[1].start)
    {
        return Err(SubcleanError::InputContract {
            message: format!("segment {}: starts before its predecessor", index + 1),
        });
    }
    Ok(())
}

/// Check diarization segments: finite, non-negative, `start <= end`.
pub fn validate_speaker_segments(segments: &[SpeakerSegment]) -> Result<()> {
    for (index, segment) in segments.iter().enumerate() {
        check_bounds("speaker segment", index, segment.start, segment.end)?;
    }
    Ok(())
}

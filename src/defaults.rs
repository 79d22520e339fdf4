//! Default configuration constants for subclean.
//!
//! Shared between the config types and the pipeline stages so both agree on
//! the same thresholds.

/// Segments whose recognizer no-speech probability exceeds this are dropped.
pub const NO_SPEECH_THRESHOLD: f64 = 0.5;

/// Minimum trimmed text length (in characters) for a segment to be kept.
pub const MIN_TEXT_CHARS: usize = 4;

/// Distinct-token ratio below which text counts as repetitive.
pub const UNIQUE_TOKEN_RATIO: f64 = 0.6;

/// A single token occurring more often than this marks text as repetitive.
pub const MAX_TOKEN_REPEAT: usize = 10;

/// Minimum length of an identical-text run before it collapses into one cue.
pub const STACK_THRESHOLD: usize = 5;

/// Segments with fewer words than this are candidates for merging.
pub const MERGE_MIN_WORDS: usize = 3;

/// Maximum gap in seconds across which a short segment is merged backwards.
pub const MERGE_MAX_PAUSE_SECS: f64 = 1.0;

/// Cues longer than this many characters are split into several cues.
pub const SPLIT_MAX_CHARS: usize = 80;

/// Half-width of the sentence-terminator search window around the split point.
pub const SPLIT_WINDOW: usize = 10;

/// Display width for soft-wrapping cue text inside one cue.
pub const WRAP_WIDTH: usize = 80;

/// Label for cues that overlap no diarization segment.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Subtitle file name written into the output directory.
pub const SUBTITLE_FILE_NAME: &str = "output.srt";

/// Repetition log file name written into the output directory.
pub const REPETITION_LOG_FILE_NAME: &str = "repetitions.log";

/// Default output directory (relative to the working directory).
pub const OUTPUT_DIR: &str = "subclean-out";

/// Default LibreTranslate endpoint.
pub const TRANSLATE_URL: &str = "http://translate.localhost/translate";

/// Default translation source language.
pub const TRANSLATE_SOURCE: &str = "ru";

/// Default translation target language.
pub const TRANSLATE_TARGET: &str = "en";

/// Per-request timeout for the translation backend.
pub const TRANSLATE_TIMEOUT_SECS: u64 = 10;

/// FFmpeg audio filter chain applied before recognition.
pub const DENOISE_FILTERS: &str = "highpass=f=200, lowpass=f=3000, afftdn, dynaudnorm";

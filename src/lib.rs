//! subclean - Subtitle refinement for speech recognition output
//!
//! Filters, stacks, merges, labels, normalizes and splits recognizer segments
//! into clean SRT subtitles, with optional denoising and translation.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod engines;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod srt;
pub mod transcript;

// Composition root - needs everything
pub mod app;

// Capability traits (recognize → refine → write → translate)
pub use engines::{Denoiser, Diarizer, Recognizer, Translator};

// Pipeline
pub use pipeline::{
    HallucinationMarkers, Pipeline, PipelineConfig, PipelineOutput, Segment, SpeakerSegment,
};
pub use srt::SubtitleWriter;

// Session
pub use app::{Session, SessionReport};

// Error handling
pub use error::{Result, SubcleanError};

// Config
pub use config::Config;

// Status reporting
pub use pipeline::status::{PipelineEvent, Stage, StatusReporter};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

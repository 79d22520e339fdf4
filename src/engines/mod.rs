//! External engines the session drives around the refinement pipeline.
//!
//! Each engine is a trait so the real implementation (transcript files,
//! ffmpeg, an HTTP translation service) can be swapped for a mock in tests.

pub mod ffmpeg;
pub mod json;
#[cfg(feature = "translate")]
pub mod libretranslate;

pub use ffmpeg::FfmpegDenoiser;
pub use json::{JsonDiarizer, JsonRecognizer};
#[cfg(feature = "translate")]
pub use libretranslate::LibreTranslator;

use crate::error::{Result, SubcleanError};
use crate::pipeline::types::{Segment, SpeakerSegment};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Produces timed segments for a media file.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, media: &Path) -> Result<Vec<Segment>>;

    /// Short name shown in status output
    fn name(&self) -> &str;
}

impl<T: Recognizer> Recognizer for Arc<T> {
    fn recognize(&self, media: &Path) -> Result<Vec<Segment>> {
        (**self).recognize(media)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Produces speaker intervals for a media file.
pub trait Diarizer: Send + Sync {
    fn diarize(&self, media: &Path) -> Result<Vec<SpeakerSegment>>;

    fn name(&self) -> &str;
}

/// Writes a cleaned copy of the input audio into `output_dir` and returns its path.
pub trait Denoiser: Send + Sync {
    fn denoise(&self, input: &Path, output_dir: &Path) -> Result<PathBuf>;

    fn name(&self) -> &str;
}

/// Translates one cue of text.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;

    /// Target language code, used in the translated file name.
    fn target(&self) -> &str;
}

/// Mock recognizer returning fixed segments
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    segments: Vec<Segment>,
    should_fail: bool,
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockRecognizer {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Media paths passed to `recognize`, in call order.
    pub fn seen(&self) -> Vec<PathBuf> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Recognizer for MockRecognizer {
    fn recognize(&self, media: &Path) -> Result<Vec<Segment>> {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(media.to_path_buf()),
            Err(poisoned) => poisoned.into_inner().push(media.to_path_buf()),
        }
        if self.should_fail {
            return Err(SubcleanError::Recognition {
                message: "mock recognition failure".to_string(),
            });
        }
        Ok(self.segments.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock diarizer returning fixed speaker intervals
#[derive(Debug, Clone, Default)]
pub struct MockDiarizer {
    speakers: Vec<SpeakerSegment>,
    should_fail: bool,
}

impl MockDiarizer {
    pub fn new(speakers: Vec<SpeakerSegment>) -> Self {
        Self {
            speakers,
            should_fail: false,
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Diarizer for MockDiarizer {
    fn diarize(&self, _media: &Path) -> Result<Vec<SpeakerSegment>> {
        if self.should_fail {
            return Err(SubcleanError::Diarization {
                message: "mock diarization failure".to_string(),
            });
        }
        Ok(self.speakers.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock denoiser that copies the input unchanged
#[derive(Debug, Clone, Default)]
pub struct MockDenoiser {
    should_fail: bool,
}

impl MockDenoiser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Denoiser for MockDenoiser {
    fn denoise(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        if self.should_fail {
            return Err(SubcleanError::Denoise {
                message: "mock denoise failure".to_string(),
            });
        }
        let output = output_dir.join(ffmpeg::CLEANED_FILE_NAME);
        std::fs::copy(input, &output)?;
        Ok(output)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock translator that tags text with the target language
#[derive(Debug, Clone)]
pub struct MockTranslator {
    target: String,
    fail_on: Option<String>,
}

impl MockTranslator {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            fail_on: None,
        }
    }

    /// Fail for any text containing `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        if let Some(needle) = &self.fail_on
            && text.contains(needle.as_str())
        {
            return Err(SubcleanError::Translation {
                message: "mock translation failure".to_string(),
            });
        }
        Ok(format!("<{}> {text}.", self.target))
    }

    fn target(&self) -> &str {
        &self.target
    }
}

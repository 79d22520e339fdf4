//! Engines backed by pre-computed JSON files.
//!
//! Recognition and diarization run elsewhere (Whisper, pyannote); these read
//! their output. Without an explicit path the sidecar next to the media file is
//! used: `talk.wav` reads `talk.json` or `talk.speakers.json`.

use super::{Diarizer, Recognizer};
use crate::error::Result;
use crate::pipeline::types::{Segment, SpeakerSegment};
use crate::transcript;
use std::path::{Path, PathBuf};

fn sidecar(media: &Path, suffix: &str) -> PathBuf {
    let stem = media
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    media.with_file_name(format!("{stem}{suffix}"))
}

#[derive(Debug, Clone, Default)]
pub struct JsonRecognizer {
    transcript: Option<PathBuf>,
}

impl JsonRecognizer {
    /// Read segments from `transcript` regardless of the media path.
    pub fn new(transcript: impl Into<PathBuf>) -> Self {
        Self {
            transcript: Some(transcript.into()),
        }
    }

    /// Read segments from `<media stem>.json`.
    pub fn sidecar() -> Self {
        Self::default()
    }

    pub fn transcript_path(&self, media: &Path) -> PathBuf {
        match &self.transcript {
            Some(path) => path.clone(),
            None => sidecar(media, ".json"),
        }
    }
}

impl Recognizer for JsonRecognizer {
    fn recognize(&self, media: &Path) -> Result<Vec<Segment>> {
        transcript::read_segments(&self.transcript_path(media))
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonDiarizer {
    speakers: Option<PathBuf>,
}

impl JsonDiarizer {
    pub fn new(speakers: impl Into<PathBuf>) -> Self {
        Self {
            speakers: Some(speakers.into()),
        }
    }

    /// Read intervals from `<media stem>.speakers.json`.
    pub fn sidecar() -> Self {
        Self::default()
    }

    pub fn speakers_path(&self, media: &Path) -> PathBuf {
        match &self.speakers {
            Some(path) => path.clone(),
            None => sidecar(media, ".speakers.json"),
        }
    }
}

impl Diarizer for JsonDiarizer {
    fn diarize(&self, media: &Path) -> Result<Vec<SpeakerSegment>> {
        transcript::read_speaker_segments(&self.speakers_path(media))
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sidecar_paths() {
        let media = Path::new("/media/talk.wav");
        assert_eq!(
            JsonRecognizer::sidecar().transcript_path(media),
            PathBuf::from("/media/talk.json")
        );
        assert_eq!(
            JsonDiarizer::sidecar().speakers_path(media),
            PathBuf::from("/media/talk.speakers.json")
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let recognizer = JsonRecognizer::new("/tmp/t.json");
        assert_eq!(
            recognizer.transcript_path(Path::new("/media/talk.wav")),
            PathBuf::from("/tmp/t.json")
        );
    }

    #[test]
    fn test_recognize_reads_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("talk.json"),
            r#"{"segments": [{"start": 0.0, "end": 1.0, "text": "sidecar"}]}"#,
        )
        .unwrap();

        let segments = JsonRecognizer::sidecar()
            .recognize(&dir.path().join("talk.wav"))
            .unwrap();
        assert_eq!(segments[0].text, "sidecar");
    }

    #[test]
    fn test_diarize_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            JsonDiarizer::sidecar()
                .diarize(&dir.path().join("talk.wav"))
                .is_err()
        );
    }
}

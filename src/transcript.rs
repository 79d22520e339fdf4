//! Reading recognizer and diarizer output from JSON.
//!
//! Both shapes are accepted: a bare array of segments, or an object with a
//! `segments` array (the layout Whisper's JSON writer produces). Unknown fields
//! are ignored. Every sequence is validated before it is returned.

use crate::error::{Result, SubcleanError};
use crate::pipeline::types::{
    Segment, SpeakerSegment, validate_segments, validate_speaker_segments,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn segment_array<T: DeserializeOwned>(contents: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(contents)?;
    let array = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("segments") {
            Some(segments @ Value::Array(_)) => segments,
            Some(_) => {
                return Err(SubcleanError::InputContract {
                    message: "\"segments\" must be an array".to_string(),
                });
            }
            None => {
                return Err(SubcleanError::InputContract {
                    message: "expected an array or an object with a \"segments\" array"
                        .to_string(),
                });
            }
        },
        _ => {
            return Err(SubcleanError::InputContract {
                message: "expected an array or an object with a \"segments\" array".to_string(),
            });
        }
    };
    Ok(serde_json::from_value(array)?)
}

/// Parse recognizer segments from JSON text.
pub fn parse_segments(contents: &str) -> Result<Vec<Segment>> {
    let segments: Vec<Segment> = segment_array(contents)?;
    validate_segments(&segments)?;
    Ok(segments)
}

/// Read recognizer segments from a JSON file.
pub fn read_segments(path: &Path) -> Result<Vec<Segment>> {
    parse_segments(&fs::read_to_string(path)?)
}

/// Parse diarization segments from JSON text.
pub fn parse_speaker_segments(contents: &str) -> Result<Vec<SpeakerSegment>> {
    let segments: Vec<SpeakerSegment> = segment_array(contents)?;
    validate_speaker_segments(&segments)?;
    Ok(segments)
}

/// Read diarization segments from a JSON file.
pub fn read_speaker_segments(path: &Path) -> Result<Vec<SpeakerSegment>> {
    parse_speaker_segments(&fs::read_to_string(path)?)
}

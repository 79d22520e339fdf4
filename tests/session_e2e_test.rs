//! End-to-end runs over transcript files on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use subclean::app::Session;
use subclean::config::Config;
use subclean::engines::{JsonDiarizer, JsonRecognizer, MockTranslator};
use subclean::pipeline::{CollectingReporter, PipelineEvent, Stage};

const TRANSCRIPT: &str = r#"{
  "text": "ignored",
  "segments": [
    {"id": 0, "start": 0.0, "end": 2.0, "text": " - Привет, как дела.", "no_speech_prob": 0.01},
    {"id": 1, "start": 2.2, "end": 2.6, "text": " ага", "no_speech_prob": 0.02},
    {"id": 2, "start": 3.0, "end": 5.0, "text": " Субтитры сделал DimaTorzok", "no_speech_prob": 0.03},
    {"id": 3, "start": 5.0, "end": 6.0, "text": " шум шум шум шум", "no_speech_prob": 0.04},
    {"id": 4, "start": 6.0, "end": 7.0, "text": " music", "no_speech_prob": 0.9},
    {"id": 5, "start": 8.0, "end": 9.0, "text": "Эй, ты!"},
    {"id": 6, "start": 9.0, "end": 10.0, "text": "Эй, ты!"},
    {"id": 7, "start": 10.0, "end": 11.0, "text": "Эй, ты!"},
    {"id": 8, "start": 11.0, "end": 12.0, "text": "Эй, ты!"},
    {"id": 9, "start": 12.0, "end": 13.0, "text": "Эй, ты!"},
    {"id": 10, "start": 14.0, "end": 16.0, "text": "Хорошо, спасибо большое"},
    {"id": 11, "start": 16.3, "end": 16.9, "text": "за помощь"}
  ]
}"#;

const SPEAKERS: &str = r#"[
  {"start": 0.0, "end": 7.5, "speaker": "SPEAKER_00"},
  {"start": 7.5, "end": 20.0, "speaker": "SPEAKER_01"}
]"#;

fn write_inputs(dir: &Path) -> Config {
    fs::write(dir.join("talk.json"), TRANSCRIPT).unwrap();
    fs::write(dir.join("talk.speakers.json"), SPEAKERS).unwrap();
    fs::write(dir.join("markers.txt"), "Субтитры сделал DimaTorzok\n\n").unwrap();

    let mut config = Config::default();
    config.output.directory = dir.join("out");
    config.filter.markers_path = Some(dir.join("markers.txt"));
    config
}

#[tokio::test]
async fn test_transcript_to_srt() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());
    let session = Session::new(config, Arc::new(JsonRecognizer::sidecar())).unwrap();

    let report = session.run(&dir.path().join("talk.wav")).await.unwrap();

    let srt = fs::read_to_string(&report.subtitle_path).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:02,000\nПривет, как дела\n\n\
         2\n00:00:08,000 --> 00:00:13,000\nЭй, ты!\n\n\
         3\n00:00:14,000 --> 00:00:16,900\nХорошо, спасибо большое за помощь\n\n"
    );
    assert_eq!(report.cues, 3);
    assert_eq!(report.repetitions, 1);

    let log = fs::read_to_string(&report.repetition_log_path).unwrap();
    assert_eq!(log, "[00:00:05,000] шум шум шум шум\n\n");
}

#[tokio::test]
async fn test_diarized_run_with_labels_and_translation() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_inputs(dir.path());
    config.output.speaker_labels = true;
    let reporter = Arc::new(CollectingReporter::new());

    let session = Session::new(config, Arc::new(JsonRecognizer::sidecar()))
        .unwrap()
        .with_diarizer(Arc::new(JsonDiarizer::sidecar()))
        .with_translator(Arc::new(MockTranslator::new("en")))
        .with_reporter(reporter.clone());

    let report = session.run(&dir.path().join("talk.wav")).await.unwrap();
    assert!(report.speakers_assigned);

    let srt = fs::read_to_string(&report.subtitle_path).unwrap();
    assert!(srt.contains("\n[SPEAKER_00] Привет, как дела\n"));
    assert!(srt.contains("\n[SPEAKER_01] Эй, ты!\n"));

    let translated = fs::read_to_string(report.translated_path.unwrap()).unwrap();
    assert!(translated.contains("\n[SPEAKER_01] <en> Хорошо, спасибо большое за помощь\n"));
    assert_eq!(translated.matches(" --> ").count(), 3);

    assert_eq!(
        reporter.finished_stages(),
        vec![
            Stage::Recognize,
            Stage::Diarize,
            Stage::Filter,
            Stage::Stack,
            Stage::Merge,
            Stage::Speakers,
            Stage::Normalize,
            Stage::Split,
            Stage::Write,
            Stage::Translate,
        ]
    );
    let drops = reporter
        .events()
        .into_iter()
        .filter(|e| matches!(e, PipelineEvent::SegmentDropped { .. }))
        .count();
    assert_eq!(drops, report.dropped);
}

#[tokio::test]
async fn test_missing_diarization_file_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());
    fs::remove_file(dir.path().join("talk.speakers.json")).unwrap();

    let session = Session::new(config, Arc::new(JsonRecognizer::sidecar()))
        .unwrap()
        .with_diarizer(Arc::new(JsonDiarizer::sidecar()));

    let report = session.run(&dir.path().join("talk.wav")).await.unwrap();
    assert!(!report.speakers_assigned);
    assert_eq!(report.cues, 3);
}

#[tokio::test]
async fn test_unordered_transcript_fails() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = dir.path().join("bad.json");
    fs::write(
        &transcript,
        r#"[{"start": 5.0, "end": 6.0, "text": "later"},
            {"start": 1.0, "end": 2.0, "text": "earlier"}]"#,
    )
    .unwrap();
    let mut config = Config::default();
    config.output.directory = dir.path().join("out");

    let session = Session::new(config, Arc::new(JsonRecognizer::new(&transcript))).unwrap();
    let err = session.run(&transcript).await.unwrap_err();
    assert!(err.to_string().contains("Invalid segment input"));
}

#[tokio::test]
async fn test_empty_transcript_writes_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = dir.path().join("empty.json");
    fs::write(&transcript, "[]").unwrap();
    let mut config = Config::default();
    config.output.directory = dir.path().join("out");

    let session = Session::new(config, Arc::new(JsonRecognizer::new(&transcript))).unwrap();
    let report = session.run(&transcript).await.unwrap();

    assert_eq!(report.cues, 0);
    assert_eq!(fs::read_to_string(&report.subtitle_path).unwrap(), "");
    assert_eq!(fs::read_to_string(&report.repetition_log_path).unwrap(), "");
}

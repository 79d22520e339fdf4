//! Subtitle session entry point.
//!
//! Orchestrates the complete media-to-subtitle flow:
//! denoise → recognize → diarize → refine → write → translate

use crate::config::Config;
use crate::engines::{Denoiser, Diarizer, Recognizer, Translator};
use crate::error::Result;
use crate::pipeline::markers::HallucinationMarkers;
use crate::pipeline::orchestrator::{Pipeline, PipelineConfig};
use crate::pipeline::status::{NullReporter, PipelineEvent, Stage, StatusReporter};
use crate::pipeline::types::Segment;
use crate::srt::{SubtitleWriter, write_repetition_log};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub subtitle_path: PathBuf,
    pub repetition_log_path: PathBuf,
    /// Present when a translator was configured
    pub translated_path: Option<PathBuf>,
    /// Cue count in the written subtitle file
    pub cues: usize,
    pub repetitions: usize,
    /// Segments discarded by the reliability filter (repetitions included)
    pub dropped: usize,
    pub speakers_assigned: bool,
    /// Cues whose translation failed and were left empty
    pub translation_failures: usize,
}

/// One configured run over a media file.
///
/// Engines are injected; only the recognizer is mandatory.
pub struct Session {
    config: Config,
    pipeline: Pipeline,
    writer: SubtitleWriter,
    recognizer: Arc<dyn Recognizer>,
    diarizer: Option<Arc<dyn Diarizer>>,
    denoiser: Option<Arc<dyn Denoiser>>,
    translator: Option<Arc<dyn Translator>>,
    reporter: Arc<dyn StatusReporter>,
}

impl Session {
    /// Validate `config`, load hallucination markers and build the pipeline.
    pub fn new(config: Config, recognizer: Arc<dyn Recognizer>) -> Result<Self> {
        config.validate()?;
        let markers = HallucinationMarkers::load(config.filter.markers_path.as_deref());
        let pipeline = Pipeline::new(PipelineConfig::from(&config), markers);
        let writer = SubtitleWriter::from(&config.output);
        Ok(Self {
            config,
            pipeline,
            writer,
            recognizer,
            diarizer: None,
            denoiser: None,
            translator: None,
            reporter: Arc::new(NullReporter),
        })
    }

    pub fn with_diarizer(mut self, diarizer: Arc<dyn Diarizer>) -> Self {
        self.diarizer = Some(diarizer);
        self
    }

    pub fn with_denoiser(mut self, denoiser: Arc<dyn Denoiser>) -> Self {
        self.denoiser = Some(denoiser);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.pipeline = self.pipeline.with_reporter(reporter.clone());
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn markers(&self) -> &HallucinationMarkers {
        self.pipeline.markers()
    }

    fn started(&self, stage: Stage, segments: usize) {
        self.reporter
            .report(&PipelineEvent::StageStarted { stage, segments });
    }

    fn finished(&self, stage: Stage, segments: usize) {
        self.reporter
            .report(&PipelineEvent::StageFinished { stage, segments });
    }

    fn warn(&self, stage: Stage, message: String) {
        self.reporter.report(&PipelineEvent::Warning { stage, message });
    }

    /// Run the whole flow for `media` and write results into the output directory.
    ///
    /// Diarization and per-cue translation failures are reported as warnings;
    /// every other failure aborts the run.
    pub async fn run(&self, media: &Path) -> Result<SessionReport> {
        let out_dir = &self.config.output.directory;
        fs::create_dir_all(out_dir)?;

        let media = match &self.denoiser {
            Some(denoiser) => {
                self.started(Stage::Denoise, 0);
                let cleaned = denoiser.denoise(media, out_dir)?;
                self.finished(Stage::Denoise, 0);
                cleaned
            }
            None => media.to_path_buf(),
        };

        self.started(Stage::Recognize, 0);
        let segments = self.recognizer.recognize(&media)?;
        self.finished(Stage::Recognize, segments.len());

        let speakers = match &self.diarizer {
            Some(diarizer) => {
                self.started(Stage::Diarize, 0);
                match diarizer.diarize(&media) {
                    Ok(speakers) => {
                        self.finished(Stage::Diarize, speakers.len());
                        Some(speakers)
                    }
                    Err(e) => {
                        self.warn(
                            Stage::Diarize,
                            format!("{e}; continuing without speaker labels"),
                        );
                        None
                    }
                }
            }
            None => None,
        };
        let speakers_assigned = speakers.as_ref().is_some_and(|s| !s.is_empty());

        let output = self.pipeline.run(segments, speakers.as_deref())?;

        let subtitle_path = out_dir.join(&self.config.output.subtitle_name);
        let repetition_log_path = out_dir.join(&self.config.output.repetition_log_name);
        self.started(Stage::Write, output.segments.len());
        self.writer.write(&subtitle_path, &output.segments)?;
        write_repetition_log(&repetition_log_path, &output.repetitions)?;
        self.finished(Stage::Write, output.segments.len());

        let (translated_path, translation_failures) = match &self.translator {
            Some(translator) => {
                let (path, failures) = self
                    .translate(translator.as_ref(), &output.segments, out_dir)
                    .await?;
                (Some(path), failures)
            }
            None => (None, 0),
        };

        Ok(SessionReport {
            subtitle_path,
            repetition_log_path,
            translated_path,
            cues: output.segments.len(),
            repetitions: output.repetitions.len(),
            dropped: output.dropped.len(),
            speakers_assigned,
            translation_failures,
        })
    }

    /// Translate cue texts one by one and write `output_<target>.srt`.
    ///
    /// Timing and speakers are kept; a failed cue is written with empty text.
    async fn translate(
        &self,
        translator: &dyn Translator,
        segments: &[Segment],
        out_dir: &Path,
    ) -> Result<(PathBuf, usize)> {
        self.started(Stage::Translate, segments.len());
        let normalizer = self.pipeline.normalizer();
        let mut translated = Vec::with_capacity(segments.len());
        let mut failures = 0;

        for (i, segment) in segments.iter().enumerate() {
            let text = match translator.translate(&segment.text).await {
                Ok(text) => normalizer.normalize_text(&text),
                Err(e) => {
                    failures += 1;
                    self.warn(Stage::Translate, format!("cue {}: {e}", i + 1));
                    String::new()
                }
            };
            translated.push(Segment {
                text,
                ..segment.clone()
            });
        }

        let path = out_dir.join(format!("output_{}.srt", translator.target()));
        self.writer.write(&path, &translated)?;
        self.finished(Stage::Translate, translated.len());
        Ok((path, failures))
    }
}

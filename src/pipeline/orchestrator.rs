//! Runs the refinement stages in order over one segment sequence.
//!
//! filter → stack → merge → speakers → normalize → split
//!
//! Every stage takes the sequence by value and hands a new one to the next.
//! The reporter hears about each stage boundary and every dropped segment.

use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::pipeline::markers::HallucinationMarkers;
use crate::pipeline::normalizer::TextNormalizer;
use crate::pipeline::reliability::{DroppedSegment, ReliabilityFilter};
use crate::pipeline::splitter::LongSegmentSplitter;
use crate::pipeline::status::{NullReporter, PipelineEvent, Stage, StatusReporter};
use crate::pipeline::types::{
    RepetitionEntry, Segment, SpeakerSegment, validate_segments, validate_speaker_segments,
};
use crate::pipeline::{merger, speaker, stacker};
use std::sync::Arc;

/// Configuration for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Reliability check thresholds
    pub filter: ReliabilityFilter,
    /// Minimum identical-run length that collapses into one cue
    pub stack_threshold: usize,
    /// Word count below which a segment may merge backwards
    pub merge_min_words: usize,
    /// Largest gap (seconds) a merge may bridge
    pub merge_max_pause: f64,
    /// Long cue splitting
    pub splitter: LongSegmentSplitter,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: ReliabilityFilter::default(),
            stack_threshold: defaults::STACK_THRESHOLD,
            merge_min_words: defaults::MERGE_MIN_WORDS,
            merge_max_pause: defaults::MERGE_MAX_PAUSE_SECS,
            splitter: LongSegmentSplitter::default(),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            filter: ReliabilityFilter::from(&config.filter),
            stack_threshold: config.stack.threshold,
            merge_min_words: config.merge.min_words,
            merge_max_pause: config.merge.max_pause,
            splitter: LongSegmentSplitter::from(&config.split),
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    /// Final cues, ready for the subtitle writer.
    pub segments: Vec<Segment>,
    /// Repetitive segments discarded by the filter, for the repetition log.
    pub repetitions: Vec<RepetitionEntry>,
    /// Everything the filter discarded.
    pub dropped: Vec<DroppedSegment>,
}

/// The segment refinement pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    markers: HallucinationMarkers,
    normalizer: TextNormalizer,
    reporter: Arc<dyn StatusReporter>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, markers: HallucinationMarkers) -> Self {
        Self {
            config,
            markers,
            normalizer: TextNormalizer::default(),
            reporter: Arc::new(NullReporter),
        }
    }

    /// Set the reporter that receives stage-boundary events.
    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn markers(&self) -> &HallucinationMarkers {
        &self.markers
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    fn stage<F>(&self, stage: Stage, segments: Vec<Segment>, apply: F) -> Vec<Segment>
    where
        F: FnOnce(Vec<Segment>) -> Vec<Segment>,
    {
        self.reporter.report(&PipelineEvent::StageStarted {
            stage,
            segments: segments.len(),
        });
        let out = apply(segments);
        self.reporter.report(&PipelineEvent::StageFinished {
            stage,
            segments: out.len(),
        });
        out
    }

    /// Run every stage over `segments`.
    ///
    /// Speaker labels are assigned only when `speakers` holds at least one
    /// interval. Fails fast on segments that break the input contract.
    pub fn run(
        &self,
        segments: Vec<Segment>,
        speakers: Option<&[SpeakerSegment]>,
    ) -> Result<PipelineOutput> {
        validate_segments(&segments)?;
        if let Some(speakers) = speakers {
            validate_speaker_segments(speakers)?;
        }

        self.reporter.report(&PipelineEvent::StageStarted {
            stage: Stage::Filter,
            segments: segments.len(),
        });
        let filtered = self.config.filter.filter(segments, &self.markers);
        for dropped in &filtered.dropped {
            self.reporter.report(&PipelineEvent::SegmentDropped {
                start: dropped.segment.start,
                text: dropped.segment.text.trim().to_string(),
                reason: dropped.reason.to_string(),
            });
        }
        self.reporter.report(&PipelineEvent::StageFinished {
            stage: Stage::Filter,
            segments: filtered.kept.len(),
        });
        let repetitions = filtered.repetitions();

        let segments = self.stage(Stage::Stack, filtered.kept, |s| {
            stacker::stack(s, self.config.stack_threshold)
        });
        let segments = self.stage(Stage::Merge, segments, |s| {
            merger::merge(s, self.config.merge_min_words, self.config.merge_max_pause)
        });
        let segments = match speakers {
            Some(speakers) if !speakers.is_empty() => {
                self.stage(Stage::Speakers, segments, |s| speaker::assign(s, speakers))
            }
            _ => segments,
        };
        let segments = self.stage(Stage::Normalize, segments, |s| {
            self.normalizer.normalize(s)
        });
        let segments = self.stage(Stage::Split, segments, |s| self.config.splitter.split(s));

        Ok(PipelineOutput {
            segments,
            repetitions,
            dropped: filtered.dropped,
        })
    }
}

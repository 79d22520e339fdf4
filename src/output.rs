//! Terminal rendering of pipeline status events.
//! Used by `subclean run` to narrate a session on stderr.

use crate::pipeline::status::{PipelineEvent, Stage, StatusReporter};

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Longest dropped-segment excerpt shown before eliding.
const DROPPED_EXCERPT_CHARS: usize = 60;

/// Stages worth a line at default verbosity: the slow external ones.
fn is_milestone(stage: Stage) -> bool {
    matches!(
        stage,
        Stage::Denoise | Stage::Recognize | Stage::Diarize | Stage::Write | Stage::Translate
    )
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= DROPPED_EXCERPT_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(DROPPED_EXCERPT_CHARS).collect();
        format!("{head}…")
    }
}

/// Render one event as a terminal line, or `None` when it should stay silent.
///
/// Verbosity: 0 shows milestones and warnings, 1 adds every stage and each
/// dropped segment, 2 adds stage starts.
pub fn render_event(event: &PipelineEvent, verbosity: u8) -> Option<String> {
    match event {
        PipelineEvent::Warning { stage, message } => {
            Some(format!("{YELLOW}[{stage}] warning:{RESET} {message}"))
        }
        PipelineEvent::StageStarted { stage, segments } if verbosity >= 2 => {
            Some(format!("{DIM}[{stage}] start ({segments} segments){RESET}"))
        }
        PipelineEvent::StageStarted { .. } => None,
        PipelineEvent::StageFinished { stage, segments }
            if verbosity >= 1 || is_milestone(*stage) =>
        {
            Some(format!("{GREEN}[{stage}]{RESET} done ({segments} segments)"))
        }
        PipelineEvent::StageFinished { .. } => None,
        PipelineEvent::SegmentDropped {
            start,
            text,
            reason,
        } if verbosity >= 1 => Some(format!(
            "{DIM}[filter]{RESET} {RED}drop{RESET} {} ({reason}): {}",
            crate::srt::format_timestamp(*start),
            excerpt(text)
        )),
        PipelineEvent::SegmentDropped { .. } => None,
    }
}

/// Prints events to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter {
    /// Only warnings get through
    pub quiet: bool,
    pub verbosity: u8,
}

impl StderrReporter {
    pub fn new(quiet: bool, verbosity: u8) -> Self {
        Self { quiet, verbosity }
    }

    fn line(&self, event: &PipelineEvent) -> Option<String> {
        if self.quiet && !matches!(event, PipelineEvent::Warning { .. }) {
            return None;
        }
        render_event(event, self.verbosity)
    }
}

impl StatusReporter for StderrReporter {
    fn report(&self, event: &PipelineEvent) {
        if let Some(line) = self.line(event) {
            eprintln!("{line}");
        }
    }
}

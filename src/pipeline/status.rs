//! Stage-boundary status events and their reporters.

use std::fmt;
use std::sync::Mutex;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Denoise,
    Recognize,
    Diarize,
    Filter,
    Stack,
    Merge,
    Speakers,
    Normalize,
    Split,
    Write,
    Translate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Denoise => "denoise",
            Stage::Recognize => "recognize",
            Stage::Diarize => "diarize",
            Stage::Filter => "filter",
            Stage::Stack => "stack",
            Stage::Merge => "merge",
            Stage::Speakers => "speakers",
            Stage::Normalize => "normalize",
            Stage::Split => "split",
            Stage::Write => "write",
            Stage::Translate => "translate",
        };
        f.write_str(name)
    }
}

/// Something worth telling the user about while the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    StageStarted { stage: Stage, segments: usize },
    StageFinished { stage: Stage, segments: usize },
    SegmentDropped { start: f64, text: String, reason: String },
    Warning { stage: Stage, message: String },
}

/// Receives pipeline events. Called synchronously at stage boundaries.
pub trait StatusReporter: Send + Sync {
    fn report(&self, event: &PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn report(&self, _event: &PipelineEvent) {}
}

/// Records events in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<PipelineEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<PipelineEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stages that reported `StageFinished`, in order.
    pub fn finished_stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::StageFinished { stage, .. } => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl StatusReporter for CollectingReporter {
    fn report(&self, event: &PipelineEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

//! Segment refinement pipeline.
//!
//! Turns raw recognizer segments into subtitle-ready cues. Each stage is a
//! pure function over an ordered segment sequence; the orchestrator runs them
//! in a fixed order and reports stage boundaries.

pub mod markers;
pub mod merger;
pub mod normalizer;
pub mod orchestrator;
pub mod reliability;
pub mod speaker;
pub mod splitter;
pub mod stacker;
pub mod status;
pub mod types;

pub use markers::HallucinationMarkers;
pub use normalizer::{LeadingDashStripper, TextNormalizer, TextPass, TrailingPeriodTrimmer};
pub use orchestrator::{Pipeline, PipelineConfig, PipelineOutput};
pub use reliability::{DropReason, DroppedSegment, FilterOutcome, ReliabilityFilter};
pub use splitter::LongSegmentSplitter;
pub use status::{CollectingReporter, NullReporter, PipelineEvent, Stage, StatusReporter};
pub use types::{RepetitionEntry, Segment, SpeakerSegment};

//! Command-line interface for subclean
//!
//! Provides argument parsing using clap derive macros.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Turn raw speech-recognition segments into clean subtitles
#[derive(Parser, Debug)]
#[command(
    name = "subclean",
    version,
    about = "Turn raw speech-recognition segments into clean subtitles"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (warnings still shown)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: every stage and dropped segment, -vv: stage starts too)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a timeout string into seconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers (seconds),
/// single-unit (`30s`, `2m`), and compound (`1m30s`).
fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs())
        .map_err(|e| e.to_string())
}

/// Options for `subclean run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Recognizer output (JSON array or object with "segments")
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: PathBuf,

    /// Diarization output (JSON with start/end/speaker intervals)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub diarization: Option<PathBuf>,

    /// Hallucination marker file, one phrase per line
    #[arg(long, short = 'm', value_name = "PATH")]
    pub markers: Option<PathBuf>,

    /// Directory for output.srt and repetitions.log
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Source media file the transcript belongs to
    #[arg(long, value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Clean the audio with ffmpeg first (requires --audio)
    #[arg(long, requires = "audio")]
    pub denoise: bool,

    /// Prefix cue text with "[speaker] "
    #[arg(long)]
    pub speaker_labels: bool,

    /// Also write a translated subtitle file for this target language
    #[arg(long, short = 't', value_name = "LANG")]
    pub translate: Option<String>,

    /// LibreTranslate endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    pub translate_url: Option<String>,

    /// Per-request translation timeout. Examples: 10, 30s, 1m
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout_secs)]
    pub translate_timeout: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refine a transcript into subtitles
    Run(RunArgs),

    /// Clean an audio file with the ffmpeg filter chain
    Denoise {
        /// Input audio or video file
        input: PathBuf,

        /// Directory to write cleaned.wav into
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Check tools and files used by `run`
    Check,

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., split.max_chars)
    Get {
        /// Dotted key path (e.g., filter.no_speech_threshold, output.directory)
        key: String,
    },
    /// Print the configuration file path
    Path,
    /// Dump the effective configuration as TOML
    Dump,
}

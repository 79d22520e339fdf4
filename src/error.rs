//! Error types for subclean.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubcleanError {
    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input contract violations
    #[error("Invalid segment input: {message}")]
    InputContract { message: String },

    #[error("Segment JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // External engine failures
    #[error("Denoising failed: {message}")]
    Denoise { message: String },

    #[error("Recognition failed: {message}")]
    Recognition { message: String },

    #[error("Diarization failed: {message}")]
    Diarization { message: String },

    #[error("Translation failed: {message}")]
    Translation { message: String },

    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SubcleanError>;

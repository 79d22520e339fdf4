//! FFmpeg-based audio cleanup.

use super::Denoiser;
use crate::defaults;
use crate::error::{Result, SubcleanError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// File name of the cleaned audio inside the output directory.
pub const CLEANED_FILE_NAME: &str = "cleaned.wav";

/// Runs the input through an ffmpeg filter chain (band-pass, FFT denoise,
/// loudness normalization).
#[derive(Debug, Clone)]
pub struct FfmpegDenoiser {
    program: String,
    filters: String,
}

impl Default for FfmpegDenoiser {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            filters: defaults::DENOISE_FILTERS.to_string(),
        }
    }
}

impl FfmpegDenoiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different ffmpeg binary (name on PATH or absolute path).
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn with_filters(mut self, filters: &str) -> Self {
        self.filters = filters.to_string();
        self
    }

    pub fn filters(&self) -> &str {
        &self.filters
    }

    /// Fails with `ToolNotFound` when the binary cannot be started.
    pub fn ensure_available(&self) -> Result<()> {
        match Command::new(&self.program).arg("-version").output() {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SubcleanError::ToolNotFound {
                    tool: self.program.clone(),
                })
            }
            Err(e) => Err(SubcleanError::Denoise {
                message: format!("cannot run {}: {e}", self.program),
            }),
        }
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "-y".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-af".into(),
            self.filters.clone().into(),
            output.as_os_str().to_owned(),
        ]
    }
}

impl Denoiser for FfmpegDenoiser {
    fn denoise(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        self.ensure_available()?;
        let output = output_dir.join(CLEANED_FILE_NAME);

        let result = Command::new(&self.program)
            .args(self.args(input, &output))
            .output()
            .map_err(|e| SubcleanError::Denoise {
                message: format!("cannot run {}: {e}", self.program),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SubcleanError::Denoise {
                message: format!("{} exited with {}: {}", self.program, result.status, stderr.trim()),
            });
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

use crate::defaults;
use crate::error::{Result, SubcleanError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub stack: StackConfig,
    pub merge: MergeConfig,
    pub split: SplitConfig,
    pub output: OutputConfig,
    pub translate: TranslateConfig,
}

/// Reliability and hallucination filtering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    pub no_speech_threshold: f64,
    pub min_chars: usize,
    pub unique_ratio: f64,
    pub max_repeat: usize,
    /// Line-oriented hallucination marker file
    pub markers_path: Option<PathBuf>,
}

/// Repeated-run stacking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    pub threshold: usize,
}

/// Short fragment merging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    pub min_words: usize,
    pub max_pause: f64,
}

/// Long cue splitting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    pub max_chars: usize,
    pub window: usize,
}

/// Subtitle and log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub wrap_width: usize,
    /// Prefix cue text with "[speaker] " when a speaker is known
    pub speaker_labels: bool,
    pub subtitle_name: String,
    pub repetition_log_name: String,
}

/// Translation backend (LibreTranslate-compatible)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslateConfig {
    pub enabled: bool,
    pub url: String,
    pub source: String,
    pub target: String,
    pub timeout_secs: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            no_speech_threshold: defaults::NO_SPEECH_THRESHOLD,
            min_chars: defaults::MIN_TEXT_CHARS,
            unique_ratio: defaults::UNIQUE_TOKEN_RATIO,
            max_repeat: defaults::MAX_TOKEN_REPEAT,
            markers_path: None,
        }
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::STACK_THRESHOLD,
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            min_words: defaults::MERGE_MIN_WORDS,
            max_pause: defaults::MERGE_MAX_PAUSE_SECS,
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::SPLIT_MAX_CHARS,
            window: defaults::SPLIT_WINDOW,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(defaults::OUTPUT_DIR),
            wrap_width: defaults::WRAP_WIDTH,
            speaker_labels: false,
            subtitle_name: defaults::SUBTITLE_FILE_NAME.to_string(),
            repetition_log_name: defaults::REPETITION_LOG_FILE_NAME.to_string(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: defaults::TRANSLATE_URL.to_string(),
            source: defaults::TRANSLATE_SOURCE.to_string(),
            target: defaults::TRANSLATE_TARGET.to_string(),
            timeout_secs: defaults::TRANSLATE_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values. Invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist.
    ///
    /// Any other failure (unreadable file, invalid TOML) is returned.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(SubcleanError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SUBCLEAN_MARKERS → filter.markers_path
    /// - SUBCLEAN_OUTPUT_DIR → output.directory
    /// - SUBCLEAN_TRANSLATE_URL → translate.url
    /// - SUBCLEAN_TARGET_LANG → translate.target
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(markers) = std::env::var("SUBCLEAN_MARKERS")
            && !markers.is_empty()
        {
            self.filter.markers_path = Some(PathBuf::from(markers));
        }

        if let Ok(dir) = std::env::var("SUBCLEAN_OUTPUT_DIR")
            && !dir.is_empty()
        {
            self.output.directory = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("SUBCLEAN_TRANSLATE_URL")
            && !url.is_empty()
        {
            self.translate.url = url;
        }

        if let Ok(target) = std::env::var("SUBCLEAN_TARGET_LANG")
            && !target.is_empty()
        {
            self.translate.target = target;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/subclean/config.toml on Linux, or a path relative to
    /// the working directory when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("subclean")
            .join("config.toml")
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        fn invalid(key: &str, message: &str) -> Result<()> {
            Err(SubcleanError::ConfigInvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        }

        if !(0.0..=1.0).contains(&self.filter.no_speech_threshold) {
            return invalid("filter.no_speech_threshold", "must be within [0, 1]");
        }
        if !(self.filter.unique_ratio > 0.0 && self.filter.unique_ratio <= 1.0) {
            return invalid("filter.unique_ratio", "must be within (0, 1]");
        }
        if self.filter.max_repeat == 0 {
            return invalid("filter.max_repeat", "must be positive");
        }
        if self.stack.threshold < 2 {
            return invalid("stack.threshold", "must be at least 2");
        }
        if !self.merge.max_pause.is_finite() || self.merge.max_pause < 0.0 {
            return invalid("merge.max_pause", "must be a non-negative number of seconds");
        }
        if self.split.max_chars == 0 {
            return invalid("split.max_chars", "must be positive");
        }
        if self.output.wrap_width == 0 {
            return invalid("output.wrap_width", "must be positive");
        }
        if self.output.subtitle_name.is_empty() {
            return invalid("output.subtitle_name", "must not be empty");
        }
        if self.output.repetition_log_name.is_empty() {
            return invalid("output.repetition_log_name", "must not be empty");
        }
        if self.translate.enabled && self.translate.target.is_empty() {
            return invalid("translate.target", "must not be empty when translation is enabled");
        }
        Ok(())
    }

    /// Look up a value by dotted key path (e.g. `split.max_chars`).
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self).map_err(|e| SubcleanError::ConfigParse {
            message: e.to_string(),
        })?;

        let mut current = &root;
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| SubcleanError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "unknown key".to_string(),
                })?;
        }

        Ok(match current {
            toml::Value::String(s) => s.clone(),
            toml::Value::Table(_) => toml::to_string_pretty(current).map_err(|e| {
                SubcleanError::ConfigParse {
                    message: e.to_string(),
                }
            })?,
            other => other.to_string(),
        })
    }

    /// Render the configuration as a TOML document.
    pub fn dump(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SubcleanError::ConfigParse {
            message: e.to_string(),
        })
    }
}

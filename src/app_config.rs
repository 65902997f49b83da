use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Video extensions searched for when a source path is a directory
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// Minimum similarity for a match to be reported
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Report matches without copying files
    #[serde(default)]
    pub dry_run: bool,

    /// Output directory for renamed video copies
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Transcription config
    #[serde(default)]
    pub whisper: WhisperConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Whisper transcription configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WhisperConfig {
    /// Model name (e.g. "base", "small", "medium")
    #[serde(default = "default_whisper_model")]
    pub model: String,

    /// Spoken language of the source audio
    #[serde(default = "default_whisper_language")]
    pub language: String,

    /// Per-subprocess timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model: default_whisper_model(),
            language: default_whisper_language(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_video_extensions() -> Vec<String> {
    vec!["mkv".to_string(), "mp4".to_string(), "mpeg4".to_string()]
}

fn default_min_similarity() -> f64 {
    // Deliberately low: fingerprint overlap is sparse for noisy transcriptions
    0.1
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_whisper_language() -> String {
    "en".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    // Whisper on CPU can take a long while for a feature-length file
    3600
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(anyhow!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            ));
        }

        if self.video_extensions.is_empty() {
            return Err(anyhow!("At least one video extension is required"));
        }

        if self.whisper.model.is_empty() {
            return Err(anyhow!("Whisper model name must not be empty"));
        }

        if self.whisper.timeout_secs == 0 {
            return Err(anyhow!("Transcription timeout must be greater than zero"));
        }

        // Copies need somewhere to go; a dry run only prints the report
        if !self.dry_run && self.output_dir.is_none() {
            return Err(anyhow!(
                "An output directory is required unless dry_run is enabled"
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            video_extensions: default_video_extensions(),
            min_similarity: default_min_similarity(),
            dry_run: false,
            output_dir: None,
            whisper: WhisperConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

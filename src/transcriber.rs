use async_trait::async_trait;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::errors::TranscriptionError;

// @module: Speech-to-text subtitle production for media files

/// Capability interface for producing a subtitle cue file from a media file.
///
/// The matching core only ever sees the returned cue file path, so it can be
/// exercised with canned fixtures and no external tooling installed.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Produce a subtitle cue file for `media_path`, returning its path.
    ///
    /// Implementations are expected to be idempotent: re-invocation for a
    /// media file that already has derived output returns the existing path
    /// without redoing the work.
    async fn produce_subtitles(&self, media_path: &Path) -> Result<PathBuf, TranscriptionError>;
}

/// Transcriber shelling out to `ffmpeg` and `whisper`.
///
/// The media file's audio is downmixed to a mono wav next to the media file,
/// transcribed by whisper, and the resulting SRT is renamed to the derived
/// output path. Intermediate files are removed afterwards.
pub struct WhisperTranscriber {
    // @field: Whisper model name (e.g. "base")
    model: String,

    // @field: Spoken language passed to whisper
    language: String,

    // @field: Per-subprocess timeout in seconds
    timeout_secs: u64,
}

impl WhisperTranscriber {
    /// Create a transcriber for the given whisper model and language
    pub fn new(model: &str, language: &str, timeout_secs: u64) -> Self {
        WhisperTranscriber {
            model: model.to_string(),
            language: language.to_string(),
            timeout_secs,
        }
    }

    /// Derived output path for a media file: `<stem>.whisper.<model>.srt`
    /// next to the media file.
    pub fn derived_subtitle_path(&self, media_path: &Path) -> PathBuf {
        let stem = media_path.file_stem().unwrap_or_default().to_string_lossy();
        let dir = media_path.parent().unwrap_or_else(|| Path::new("."));
        dir.join(format!("{}.whisper.{}.srt", stem, self.model))
    }

    fn unavailable(media_path: &Path, reason: impl Into<String>) -> TranscriptionError {
        TranscriptionError::Unavailable {
            path: media_path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Run a subprocess with a timeout, failing on a nonzero exit status
    async fn run_command(
        &self,
        media_path: &Path,
        program: &str,
        args: &[&str],
        workdir: &Path,
    ) -> Result<(), TranscriptionError> {
        let command_future = Command::new(program).args(args).current_dir(workdir).output();

        let output = tokio::select! {
            result = command_future => {
                result.map_err(|e| Self::unavailable(media_path, format!("failed to execute {}: {}", program, e)))?
            },
            _ = tokio::time::sleep(Duration::from_secs(self.timeout_secs)) => {
                return Err(Self::unavailable(media_path, format!("{} timed out after {}s", program, self.timeout_secs)));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            tail.reverse();
            error!("{} failed for {:?}: {}", program, media_path, tail.join(" | "));
            return Err(Self::unavailable(
                media_path,
                format!("{} exited with {}", program, output.status),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn produce_subtitles(&self, media_path: &Path) -> Result<PathBuf, TranscriptionError> {
        let srt_path = self.derived_subtitle_path(media_path);
        if srt_path.exists() {
            debug!("Skipping previously transcribed subtitles for {:?}", media_path);
            return Ok(srt_path);
        }

        let workdir = media_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = media_path.file_stem().unwrap_or_default().to_string_lossy();
        let wav_name = format!("{}.wav", stem);
        let wav_path = workdir.join(&wav_name);

        // Stale wav from an interrupted run would make ffmpeg prompt
        let _ = std::fs::remove_file(&wav_path);

        info!("Transcribing {:?}", media_path);

        let media_arg = media_path.to_string_lossy().to_string();
        self.run_command(
            media_path,
            "ffmpeg",
            &["-i", media_arg.as_str(), "-ac", "1", wav_name.as_str()],
            workdir,
        )
        .await?;

        self.run_command(
            media_path,
            "whisper",
            &[
                "--model",
                self.model.as_str(),
                "--language",
                self.language.as_str(),
                wav_name.as_str(),
            ],
            workdir,
        )
        .await?;

        // Whisper writes a sibling file per output format; only the SRT is kept
        for ext in ["txt", "vtt", "tsv", "json"] {
            let _ = std::fs::remove_file(workdir.join(format!("{}.{}", stem, ext)));
        }
        let _ = std::fs::remove_file(&wav_path);

        let whisper_srt = workdir.join(format!("{}.srt", wav_name));
        std::fs::rename(&whisper_srt, &srt_path).map_err(|e| {
            Self::unavailable(
                media_path,
                format!("whisper produced no SRT output ({:?}): {}", whisper_srt, e),
            )
        })?;

        Ok(srt_path)
    }
}

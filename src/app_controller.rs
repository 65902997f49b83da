use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::corpus::Corpus;
use crate::cue_parser;
use crate::file_utils::{FileManager, FileType};
use crate::fingerprint::{self, FingerprintSet};
use crate::matcher::{self, MatchResult};
use crate::report::MatchReport;
use crate::transcriber::{Transcriber, WhisperTranscriber};

// @module: Application controller for corpus construction and matching

/// Main application controller for content-based video matching
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the full workflow: build both corpora, match, report, copy.
    ///
    /// The report is written to stdout; copies are skipped in dry-run mode.
    pub async fn run(&self, sources: &[PathBuf], targets: &[PathBuf]) -> Result<()> {
        let transcriber = WhisperTranscriber::new(
            &self.config.whisper.model,
            &self.config.whisper.language,
            self.config.whisper.timeout_secs,
        );

        let results = self.run_matching(sources, targets, &transcriber).await?;

        MatchReport::new(&results)
            .write_csv(std::io::stdout().lock())
            .context("Failed to write match report")?;

        if self.config.dry_run {
            info!("Dry run: {} match(es) reported, no files copied", results.len());
        } else {
            self.copy_matches(&results)?;
        }

        Ok(())
    }

    /// Build both corpora with the given transcriber and produce the match
    /// decisions, without report or copy side effects.
    pub async fn run_matching(
        &self,
        sources: &[PathBuf],
        targets: &[PathBuf],
        transcriber: &dyn Transcriber,
    ) -> Result<Vec<MatchResult>> {
        let source_corpus = self.build_source_corpus(sources, transcriber).await?;
        let target_corpus = self.build_target_corpus(targets)?;

        info!(
            "Matching {} target(s) against {} source(s)",
            target_corpus.len(),
            source_corpus.len()
        );

        Ok(matcher::find_matches(
            &source_corpus,
            &target_corpus,
            self.config.min_similarity,
        ))
    }

    /// Build the source corpus: transcribe each resolved media file and
    /// fingerprint the resulting cue file, keyed by the media path.
    ///
    /// Per-file failures are logged and skipped; the corpus holds whatever
    /// files succeeded.
    async fn build_source_corpus(
        &self,
        sources: &[PathBuf],
        transcriber: &dyn Transcriber,
    ) -> Result<Corpus> {
        let files = FileManager::resolve_files(sources, &self.config.video_extensions)?;
        if files.is_empty() {
            return Err(anyhow::anyhow!("No source files found"));
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Fingerprinting sources");

        let mut corpus = Corpus::new();
        for file in &files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("Processing: {}", file_name));

            // A subtitle file given directly as a source needs no transcription
            let cue_file = match FileManager::detect_file_type(file) {
                Ok(FileType::Subtitle) => file.clone(),
                Ok(_) => match transcriber.produce_subtitles(file).await {
                    Ok(path) => path,
                    Err(e) => {
                        warn!("{}", e);
                        progress_bar.inc(1);
                        continue;
                    }
                },
                Err(e) => {
                    warn!("Skipping unreadable source {:?}: {}", file, e);
                    progress_bar.inc(1);
                    continue;
                }
            };

            match Self::fingerprint_cue_file(&cue_file) {
                Ok(fingerprints) => corpus.add(file.clone(), fingerprints),
                Err(e) => error!("Failed to process subtitles for {:?}: {}", file, e),
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Source corpus ready: {} of {} file(s) fingerprinted",
            corpus.len(),
            files.len()
        );

        Ok(corpus)
    }

    /// Build the target corpus from subtitle files carrying the desired names
    fn build_target_corpus(&self, targets: &[PathBuf]) -> Result<Corpus> {
        let subtitle_extensions = ["srt".to_string()];
        let files = FileManager::resolve_files(targets, &subtitle_extensions)?;
        if files.is_empty() {
            return Err(anyhow::anyhow!("No target subtitle files found"));
        }

        let mut corpus = Corpus::new();
        for file in &files {
            debug!("Loading target subtitles from {:?}", file);
            match Self::fingerprint_cue_file(file) {
                Ok(fingerprints) => corpus.add(file.clone(), fingerprints),
                Err(e) => error!("Failed to process subtitles for {:?}: {}", file, e),
            }
        }

        Ok(corpus)
    }

    /// Parse and fingerprint one cue file
    fn fingerprint_cue_file(path: &Path) -> Result<FingerprintSet> {
        let cues = cue_parser::parse_cue_file(path)?;
        let fingerprints = fingerprint::fingerprint_cues(&cues)?;
        Ok(fingerprints)
    }

    /// Copy each matched source under its target's name into the output
    /// directory. A failed copy is logged and does not stop the rest.
    fn copy_matches(&self, results: &[MatchResult]) -> Result<()> {
        let output_dir = self
            .config
            .output_dir
            .as_ref()
            .context("An output directory is required to copy matched files")?;

        FileManager::ensure_dir(output_dir)?;

        for result in results {
            let target_stem = result
                .target
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "unnamed".to_string());

            let output_path = match result.source.extension() {
                Some(ext) => output_dir.join(format!("{}.{}", target_stem, ext.to_string_lossy())),
                None => output_dir.join(&target_stem),
            };

            info!("Copying {:?} -> {:?}", result.source, output_path);
            if let Err(e) = FileManager::copy_file(&result.source, &output_path) {
                error!("Failed to copy {:?}: {}", result.source, e);
            }
        }

        Ok(())
    }
}

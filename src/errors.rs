/*!
 * Error types for the vidmatch application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing a subtitle cue stream
#[derive(Error, Debug)]
pub enum CueError {
    /// The stream does not follow the index/timing/text/blank block structure
    #[error("Malformed cue at line {line}: expected an integer cue index, got {found:?}")]
    MalformedCue {
        /// 1-based line number of the offending line
        line: usize,
        /// The line content that failed to parse
        found: String,
    },

    /// Error reading from the underlying stream
    #[error("Failed to read cue stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while normalizing cue text into fingerprints
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// Sentence or word segmentation could not process the input
    #[error("Segmentation failed: {0}")]
    Segmentation(String),
}

/// Errors that can occur while producing subtitles for a media file
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The transcription step did not produce usable output
    #[error("Transcription unavailable for {path:?}: {reason}")]
    Unavailable {
        /// Media file the transcription was requested for
        path: PathBuf,
        /// Why no usable output was produced
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from cue parsing
    #[error("Cue error: {0}")]
    Cue(#[from] CueError),

    /// Error from fingerprint normalization
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Error from transcription
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

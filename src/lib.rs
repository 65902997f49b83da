/*!
 * # vidmatch - Content-Based Video Matching
 *
 * A Rust library for matching anonymously-named video files to known-named
 * subtitle files by comparing the semantic content of their dialogue.
 *
 * ## Features
 *
 * - Parse subtitle cue files into dialogue text
 * - Normalize dialogue into order-independent sentence fingerprints
 * - Score fingerprint overlap with Jaccard similarity
 * - Pick the best-scoring source for every target above a threshold
 * - Produce subtitles for videos via ffmpeg + whisper
 * - Emit match decisions as a CSV report and copy matched files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `cue_parser`: Streaming subtitle cue parsing
 * - `fingerprint`: Sentence canonicalization and hashing
 * - `corpus`: Fingerprint store keyed by file path
 * - `matcher`: Cross-corpus similarity scoring and selection
 * - `transcriber`: Speech-to-text capability for media files
 * - `report`: CSV emission of match decisions
 * - `file_utils`: File system operations and path resolution
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod corpus;
pub mod cue_parser;
pub mod errors;
pub mod file_utils;
pub mod fingerprint;
pub mod matcher;
pub mod report;
pub mod transcriber;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use corpus::Corpus;
pub use cue_parser::CueParser;
pub use errors::{AppError, CueError, FingerprintError, TranscriptionError};
pub use fingerprint::{fingerprint_cues, FingerprintSet};
pub use matcher::{find_matches, jaccard_similarity, MatchResult};
pub use transcriber::{Transcriber, WhisperTranscriber};

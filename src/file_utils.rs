use anyhow::{Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: SRT content sniff regex (sequence number followed by a timing line)
static SRT_SNIFF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\r?\n\d{2}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2}:\d{2}:\d{2},\d{3}").unwrap()
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory.
    ///
    /// Traversal order is sorted by file name so repeated runs over the same
    /// tree produce the same sequence.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref())
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Resolve configured input paths into a flat, deduplicated sequence of
    /// concrete file paths.
    ///
    /// A path naming a file is taken as-is; a path naming a directory is
    /// walked recursively for files matching one of `extensions`; a missing
    /// path is skipped with a warning. Output order is deterministic: input
    /// order first, sorted traversal within each directory, first occurrence
    /// wins on duplicates.
    pub fn resolve_files(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        let mut push = |path: PathBuf, out: &mut Vec<PathBuf>| {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        };

        for path in paths {
            if Self::file_exists(path) {
                push(path.clone(), &mut resolved);
            } else if Self::dir_exists(path) {
                for ext in extensions {
                    for file in Self::find_files(path, ext)? {
                        push(file, &mut resolved);
                    }
                }
            } else {
                warn!("Skipping configured path that does not exist: {:?}", path);
            }
        }

        Ok(resolved)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a text file, decoding as UTF-8 with a Latin-1 fallback.
    ///
    /// Whisper and older subtitle tooling emit single-byte Western-European
    /// files; every byte sequence is valid Latin-1, so the fallback cannot
    /// fail.
    pub fn read_text_with_latin1_fallback<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
        })
    }

    /// Copy a file from one location to another, ensuring the target directory exists
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::copy(from, to)?;

        Ok(())
    }

    /// Detect whether a file is a subtitle cue file or a media file.
    ///
    /// Extension is checked first; unrecognized extensions fall back to
    /// sniffing the content for the SRT block pattern.
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();

            if ext_str == "srt" {
                return Ok(FileType::Subtitle);
            }

            let video_extensions = [
                "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "mpeg4",
                "ogv", "ts", "mts", "m2ts",
            ];

            if video_extensions.contains(&ext_str.as_str()) {
                return Ok(FileType::Video);
            }
        }

        // Fall back to examining file contents
        if let Ok(content) = Self::read_text_with_latin1_fallback(path) {
            if content.contains("-->") && SRT_SNIFF_REGEX.is_match(&content) {
                return Ok(FileType::Subtitle);
            }
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Subtitle cue file (SRT)
    Subtitle,
    /// Video/media file
    Video,
    /// Unknown file type
    Unknown,
}

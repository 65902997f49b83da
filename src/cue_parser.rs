use std::io::BufRead;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

use crate::errors::CueError;
use crate::file_utils::FileManager;

// @module: Streaming parser for subtitle cue files

// @enum: Parser state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    // @state: Waiting for an integer cue index line
    ExpectIndex,

    // @state: Waiting for the timing line (content not validated)
    ExpectTiming,

    // @state: Collecting text lines until a blank line
    AccumulateText,
}

/// Streaming parser over a subtitle cue stream.
///
/// Consumes sequential blocks of `index line`, `timing line`, one or more
/// `text lines`, `blank line` and yields one text string per cue, with
/// multi-line cue text joined by single spaces. The iterator is lazy, finite
/// and non-restartable; reopen the source to parse again.
///
/// Every input line is NFC-normalized before inspection so that byte-level
/// differences between equivalent Unicode encodings do not leak into the
/// produced cue text.
pub struct CueParser<R: BufRead> {
    lines: std::io::Lines<R>,
    state: ParserState,
    accum: Vec<String>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> CueParser<R> {
    /// Create a parser over a buffered reader
    pub fn new(reader: R) -> Self {
        CueParser {
            lines: reader.lines(),
            state: ParserState::ExpectIndex,
            accum: Vec::new(),
            line_no: 0,
            done: false,
        }
    }

    fn flush_accum(&mut self) -> String {
        let cue = self.accum.join(" ");
        self.accum.clear();
        cue
    }
}

impl<R: BufRead> Iterator for CueParser<R> {
    type Item = Result<String, CueError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(CueError::Io(e)));
                }
                None => {
                    // End of stream: a file not terminated by a trailing
                    // blank line still yields its final cue.
                    self.done = true;
                    if !self.accum.is_empty() {
                        return Some(Ok(self.flush_accum()));
                    }
                    return None;
                }
            };

            self.line_no += 1;
            let line: String = line.nfc().collect();
            let trimmed = line.trim();

            match self.state {
                ParserState::ExpectIndex => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed.parse::<u64>().is_err() {
                        self.done = true;
                        return Some(Err(CueError::MalformedCue {
                            line: self.line_no,
                            found: trimmed.to_string(),
                        }));
                    }
                    // The index value itself is irrelevant for matching
                    self.state = ParserState::ExpectTiming;
                }
                ParserState::ExpectTiming => {
                    // Timing line content is opaque to this parser
                    self.state = ParserState::AccumulateText;
                }
                ParserState::AccumulateText => {
                    if !trimmed.is_empty() {
                        self.accum.push(trimmed.to_string());
                    } else {
                        self.state = ParserState::ExpectIndex;
                        return Some(Ok(self.flush_accum()));
                    }
                }
            }
        }
    }
}

/// Parse a subtitle cue file into its cue text strings.
///
/// Decoding tolerates single-byte Western-European files (typical whisper
/// output) by falling back to Latin-1 when the content is not valid UTF-8.
pub fn parse_cue_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CueError> {
    let content = FileManager::read_text_with_latin1_fallback(path)?;
    parse_cue_string(&content)
}

/// Parse subtitle cue content from an in-memory string
pub fn parse_cue_string(content: &str) -> Result<Vec<String>, CueError> {
    CueParser::new(content.as_bytes()).collect()
}

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::FingerprintError;

// @module: Content fingerprinting of cue text

/// Set of sentence digests identifying the dialogue content of one file.
///
/// A repeated sentence contributes a single fingerprint; ordering is
/// irrelevant by construction.
pub type FingerprintSet = HashSet<String>;

/// Normalize the cue text of one file into its fingerprint set.
///
/// Cue boundaries are discarded: all cues are joined into one blob and
/// re-segmented into sentences, since a sentence may span multiple cues and
/// a cue may contain multiple sentences. Each sentence is canonicalized
/// (lowercased, punctuation-stripped, whitespace-collapsed) and hashed.
///
/// This is a pure function of the cue text: the same input always produces
/// the same set. Sentences that canonicalize to nothing contribute no
/// fingerprint.
pub fn fingerprint_cues(cues: &[String]) -> Result<FingerprintSet, FingerprintError> {
    let blob = cues.join(" ");

    let mut fingerprints = HashSet::new();
    for sentence in blob.unicode_sentences() {
        let canonical = canonical_sentence(sentence);
        if canonical.is_empty() {
            continue;
        }
        fingerprints.insert(sentence_digest(&canonical));
    }

    Ok(fingerprints)
}

/// Canonicalize one sentence: tokenize into words, lowercase each token,
/// strip punctuation characters, drop empty tokens, rejoin with single spaces.
fn canonical_sentence(sentence: &str) -> String {
    sentence
        .unicode_words()
        .map(|word| {
            word.to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase hex SHA-256 digest of a canonical sentence
fn sentence_digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

use std::path::{Path, PathBuf};

use log::debug;

use crate::corpus::Corpus;
use crate::fingerprint::FingerprintSet;

// @module: Cross-corpus similarity scoring and best-match selection

/// One match decision: a target, its best-scoring source and the score
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Target subtitle file carrying the desired name
    pub target: PathBuf,

    /// Best-scoring source file
    pub source: PathBuf,

    /// Jaccard similarity of the two fingerprint sets, in (threshold, 1]
    pub similarity: f64,
}

/// Jaccard index of two fingerprint sets.
///
/// `|A ∩ B| / (|A| + |B| - |A ∩ B|)`, with 0.0 when both sets are empty so
/// degenerate corpus entries never crash the scorer.
pub fn jaccard_similarity(a: &FingerprintSet, b: &FingerprintSet) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Score every target against every source and keep the best match per target.
///
/// Best-so-far state is scoped to each target. Ties keep the first-seen
/// maximum, so results are deterministic given the source corpus's insertion
/// order. A target whose best score is not strictly greater than
/// `min_similarity` produces no result at all rather than a row with an empty
/// match.
///
/// The full cross product is scored with no pruning; corpora are expected to
/// stay in the tens-to-hundreds range.
pub fn find_matches(sources: &Corpus, targets: &Corpus, min_similarity: f64) -> Vec<MatchResult> {
    let mut results = Vec::new();

    for (target, target_set) in targets.iter() {
        let mut best: Option<(&Path, f64)> = None;

        for (source, source_set) in sources.iter() {
            let similarity = jaccard_similarity(source_set, target_set);
            if best.is_none_or(|(_, best_similarity)| similarity > best_similarity) {
                best = Some((source, similarity));
            }
        }

        match best {
            Some((source, similarity)) if similarity > min_similarity => {
                results.push(MatchResult {
                    target: target.to_path_buf(),
                    source: source.to_path_buf(),
                    similarity,
                });
            }
            Some((source, similarity)) => {
                debug!(
                    "No match for {:?}: best candidate {:?} scored {:.3}, below threshold {:.3}",
                    target, source, similarity, min_similarity
                );
            }
            None => {
                debug!("No match for {:?}: source corpus is empty", target);
            }
        }
    }

    results
}

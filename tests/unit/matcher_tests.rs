/*!
 * Tests for similarity scoring and best-match selection
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use vidmatch::corpus::Corpus;
use vidmatch::fingerprint::FingerprintSet;
use vidmatch::matcher::{find_matches, jaccard_similarity};

fn set_of(values: &[&str]) -> FingerprintSet {
    values.iter().map(|v| v.to_string()).collect::<HashSet<_>>()
}

/// Test that similarity is symmetric
#[test]
fn test_jaccard_similarity_withAnyTwoSets_shouldBeSymmetric() {
    let a = set_of(&["s1", "s2", "s3"]);
    let b = set_of(&["s2", "s4"]);

    assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
}

/// Test that similarity stays within [0, 1] and is 1 for a non-empty set with itself
#[test]
fn test_jaccard_similarity_withVariousSets_shouldStayWithinBounds() {
    let a = set_of(&["s1", "s2"]);
    let b = set_of(&["s3"]);
    let c = set_of(&["s1", "s3"]);

    for (x, y) in [(&a, &b), (&a, &c), (&b, &c)] {
        let sim = jaccard_similarity(x, y);
        assert!((0.0..=1.0).contains(&sim));
    }

    assert_eq!(jaccard_similarity(&a, &a), 1.0);
}

/// Test the division-by-zero guard when both sets are empty
#[test]
fn test_jaccard_similarity_withBothSetsEmpty_shouldReturnZero() {
    let empty = FingerprintSet::new();

    assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
}

/// Test that one empty set scores zero against anything
#[test]
fn test_jaccard_similarity_withOneEmptySet_shouldReturnZero() {
    let empty = FingerprintSet::new();
    let full = set_of(&["s1", "s2"]);

    assert_eq!(jaccard_similarity(&empty, &full), 0.0);
    assert_eq!(jaccard_similarity(&full, &empty), 0.0);
}

/// Test the documented one-of-four-shared-sentences score
#[test]
fn test_jaccard_similarity_withOneSharedOfFourEach_shouldScoreOneSeventh() {
    let a = set_of(&["s1", "s2", "s3", "shared"]);
    let b = set_of(&["s4", "s5", "s6", "shared"]);

    let sim = jaccard_similarity(&a, &b);

    assert!((sim - 1.0 / 7.0).abs() < f64::EPSILON);
}

/// Test that identical content scores a full match
#[test]
fn test_find_matches_withIdenticalSets_shouldScoreFullSimilarity() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("video.mkv"), set_of(&["s1", "s2"]));

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("named.srt"), set_of(&["s1", "s2"]));

    let results = find_matches(&sources, &targets, 0.1);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].target, Path::new("named.srt"));
    assert_eq!(results[0].source, Path::new("video.mkv"));
    assert_eq!(results[0].similarity, 1.0);
}

/// Test that a best score below the threshold produces no row
#[test]
fn test_find_matches_withBestScoreBelowThreshold_shouldProduceNoRow() {
    // One of five shared across union of nine: 1/9 ≈ 0.11, well below 0.5
    let mut sources = Corpus::new();
    sources.add(
        PathBuf::from("video.mkv"),
        set_of(&["s1", "s2", "s3", "s4", "shared"]),
    );

    let mut targets = Corpus::new();
    targets.add(
        PathBuf::from("named.srt"),
        set_of(&["s5", "s6", "s7", "s8", "shared"]),
    );

    let results = find_matches(&sources, &targets, 0.5);

    assert!(results.is_empty());
}

/// Test that the threshold comparison is strictly greater-than
#[test]
fn test_find_matches_withBestScoreEqualToThreshold_shouldProduceNoRow() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("video.mkv"), set_of(&["s1", "s2"]));

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("named.srt"), set_of(&["s1", "s2"]));

    // Identical sets score exactly 1.0, which is not strictly greater
    let results = find_matches(&sources, &targets, 1.0);

    assert!(results.is_empty());
}

/// Test that ties keep the first-seen source
#[test]
fn test_find_matches_withTiedScores_shouldKeepFirstSeenSource() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("first.mkv"), set_of(&["s1"]));
    sources.add(PathBuf::from("second.mkv"), set_of(&["s1"]));

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("named.srt"), set_of(&["s1"]));

    let results = find_matches(&sources, &targets, 0.1);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, Path::new("first.mkv"));
}

/// Test that best-so-far state is scoped per target
#[test]
fn test_find_matches_withMultipleTargets_shouldScopeBestMatchPerTarget() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("alpha.mkv"), set_of(&["a1", "a2"]));
    sources.add(PathBuf::from("beta.mkv"), set_of(&["b1", "b2"]));

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("beta.srt"), set_of(&["b1", "b2"]));
    targets.add(PathBuf::from("alpha.srt"), set_of(&["a1", "a2"]));

    let results = find_matches(&sources, &targets, 0.1);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].target, Path::new("beta.srt"));
    assert_eq!(results[0].source, Path::new("beta.mkv"));
    assert_eq!(results[1].target, Path::new("alpha.srt"));
    assert_eq!(results[1].source, Path::new("alpha.mkv"));
}

/// Test that repeated runs over the same corpora produce identical results
#[test]
fn test_find_matches_withSameInputsTwice_shouldBeDeterministic() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("one.mkv"), set_of(&["s1", "s2"]));
    sources.add(PathBuf::from("two.mkv"), set_of(&["s2", "s3"]));

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("a.srt"), set_of(&["s2"]));
    targets.add(PathBuf::from("b.srt"), set_of(&["s3"]));

    let first = find_matches(&sources, &targets, 0.1);
    let second = find_matches(&sources, &targets, 0.1);

    assert_eq!(first, second);
}

/// Test that an empty source corpus matches nothing and never crashes
#[test]
fn test_find_matches_withEmptySourceCorpus_shouldProduceNoRows() {
    let sources = Corpus::new();

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("named.srt"), set_of(&["s1"]));

    let results = find_matches(&sources, &targets, 0.1);

    assert!(results.is_empty());
}

/// Test that empty fingerprint sets participate without crashing the scorer
#[test]
fn test_find_matches_withEmptyFingerprintSets_shouldNotCrash() {
    let mut sources = Corpus::new();
    sources.add(PathBuf::from("empty.mkv"), FingerprintSet::new());

    let mut targets = Corpus::new();
    targets.add(PathBuf::from("empty.srt"), FingerprintSet::new());
    targets.add(PathBuf::from("full.srt"), set_of(&["s1"]));

    let results = find_matches(&sources, &targets, 0.1);

    assert!(results.is_empty());
}

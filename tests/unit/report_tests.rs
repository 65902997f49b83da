/*!
 * Tests for CSV report emission
 */

use anyhow::Result;
use std::path::PathBuf;
use vidmatch::matcher::MatchResult;
use vidmatch::report::MatchReport;

/// Test that the report carries the fixed three-column header
#[test]
fn test_write_csv_withNoResults_shouldEmitHeaderOnly() -> Result<()> {
    let results = Vec::new();
    let mut buffer = Vec::new();

    MatchReport::new(&results).write_csv(&mut buffer)?;

    let output = String::from_utf8(buffer)?;
    assert_eq!(output.trim_end(), "Target,Best Source,Similarity");

    Ok(())
}

/// Test that rows appear in processing order with the expected columns
#[test]
fn test_write_csv_withResults_shouldEmitRowsInOrder() -> Result<()> {
    let results = vec![
        MatchResult {
            target: PathBuf::from("first.srt"),
            source: PathBuf::from("a.mkv"),
            similarity: 0.5,
        },
        MatchResult {
            target: PathBuf::from("second.srt"),
            source: PathBuf::from("b.mkv"),
            similarity: 0.25,
        },
    ];
    let mut buffer = Vec::new();

    MatchReport::new(&results).write_csv(&mut buffer)?;

    let output = String::from_utf8(buffer)?;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Target,Best Source,Similarity");
    assert_eq!(lines[1], "first.srt,a.mkv,0.5");
    assert_eq!(lines[2], "second.srt,b.mkv,0.25");

    Ok(())
}

/// Test that paths containing the delimiter are quoted
#[test]
fn test_write_csv_withCommaInPath_shouldQuoteField() -> Result<()> {
    let results = vec![MatchResult {
        target: PathBuf::from("show, season 1.srt"),
        source: PathBuf::from("a.mkv"),
        similarity: 1.0,
    }];
    let mut buffer = Vec::new();

    MatchReport::new(&results).write_csv(&mut buffer)?;

    let output = String::from_utf8(buffer)?;
    assert!(output.contains("\"show, season 1.srt\""));

    Ok(())
}

use anyhow::{Context, Result};
use std::io::Write;

use crate::matcher::MatchResult;

// @module: Tabular emission of match decisions

/// CSV report over a set of match decisions.
///
/// Rows appear in the order the targets were processed; unmatched targets
/// have no row at all.
pub struct MatchReport<'a> {
    results: &'a [MatchResult],
}

impl<'a> MatchReport<'a> {
    /// Create a report over the given match results
    pub fn new(results: &'a [MatchResult]) -> Self {
        MatchReport { results }
    }

    /// Write the report as CSV with a fixed three-column header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        csv_writer
            .write_record(["Target", "Best Source", "Similarity"])
            .context("Failed to write report header")?;

        for result in self.results {
            csv_writer
                .write_record(&[
                    result.target.display().to_string(),
                    result.source.display().to_string(),
                    result.similarity.to_string(),
                ])
                .context("Failed to write report row")?;
        }

        csv_writer.flush().context("Failed to flush report")?;

        Ok(())
    }
}

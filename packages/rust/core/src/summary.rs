//! Per-run tallies and the end-of-run report.

use std::fmt::Write as _;

use crate::apply::UpdateFlags;

/// Counts accumulated over one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    flags: UpdateFlags,
    /// Rows where at least one label or genre was actually added.
    pub processed: usize,
    /// Rows that requested nothing.
    pub skipped: usize,
    /// Titles with no matching entry, in encounter order.
    pub not_found: Vec<String>,
    pub labels_added: usize,
    pub genres_added: usize,
}

impl RunSummary {
    pub fn new(flags: UpdateFlags) -> Self {
        Self {
            flags,
            processed: 0,
            skipped: 0,
            not_found: Vec::new(),
            labels_added: 0,
            genres_added: 0,
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_not_found(&mut self, title: &str) {
        self.not_found.push(title.to_string());
    }

    /// Record the additions made for one matched row. Rows that added
    /// nothing do not count as processed.
    pub fn record_added(&mut self, labels: usize, genres: usize) {
        if labels > 0 || genres > 0 {
            self.processed += 1;
            self.labels_added += labels;
            self.genres_added += genres;
        }
    }

    /// True when the file produced no rows at all.
    pub fn is_empty_run(&self) -> bool {
        self.processed == 0 && self.skipped == 0 && self.not_found.is_empty()
    }

    /// Render the report printed at the end of a run.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Summary:");
        let _ = writeln!(out, "  Shows processed: {}", self.processed);
        let _ = writeln!(out, "  Shows skipped (no data): {}", self.skipped);
        let _ = writeln!(out, "  Shows not found: {}", self.not_found.len());
        if self.flags.labels {
            let _ = writeln!(out, "  Labels added: {}", self.labels_added);
        }
        if self.flags.genres {
            let _ = writeln!(out, "  Genres added: {}", self.genres_added);
        }

        if !self.not_found.is_empty() {
            let _ = writeln!(out, "\nShows not found in Plex library:");
            for title in &self.not_found {
                let _ = writeln!(out, "  - {title}");
            }
        }

        if self.is_empty_run() {
            let _ = writeln!(out, "\nNo shows processed. Check your CSV format.");
            let _ = writeln!(
                out,
                "CSV should have 'Title' column and either 'Labels' or 'addGenre' columns."
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_rows_do_not_count_as_processed() {
        let mut summary = RunSummary::new(UpdateFlags::ALL);
        summary.record_added(0, 0);
        summary.record_added(2, 0);
        summary.record_added(0, 1);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.labels_added, 2);
        assert_eq!(summary.genres_added, 1);
    }

    #[test]
    fn render_lists_counts_and_missing_titles() {
        let mut summary = RunSummary::new(UpdateFlags::ALL);
        summary.record_added(2, 1);
        summary.record_skipped();
        summary.record_not_found("Nonexistent Show");
        summary.record_not_found("Another One");

        let report = summary.render();
        assert!(report.contains("Shows processed: 1"));
        assert!(report.contains("Shows skipped (no data): 1"));
        assert!(report.contains("Shows not found: 2"));
        assert!(report.contains("Labels added: 2"));
        assert!(report.contains("Genres added: 1"));
        assert!(report.contains("  - Nonexistent Show\n  - Another One"));
        assert!(!report.contains("Check your CSV format"));
    }

    #[test]
    fn render_hides_disabled_categories() {
        let summary = RunSummary::new(UpdateFlags {
            labels: true,
            genres: false,
        });
        let report = summary.render();
        assert!(report.contains("Labels added: 0"));
        assert!(!report.contains("Genres added"));
    }

    #[test]
    fn empty_run_gets_format_hint() {
        let summary = RunSummary::new(UpdateFlags::ALL);
        assert!(summary.is_empty_run());
        let report = summary.render();
        assert!(report.contains("No shows processed. Check your CSV format."));
        assert!(report.contains("'Title' column and either 'Labels' or 'addGenre'"));
    }

    #[test]
    fn skipped_only_run_is_not_empty() {
        let mut summary = RunSummary::new(UpdateFlags::ALL);
        summary.record_skipped();
        assert!(!summary.is_empty_run());
        assert!(!summary.render().contains("Check your CSV format"));
    }
}

//! End-to-end import: CSV file → rows → reconcile each row → summary.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use plextags_shared::{Catalog, PlexTagsError, Result, TextEncoding};

use crate::apply::UpdateFlags;
use crate::reader;
use crate::reconcile::reconcile_row;
use crate::summary::RunSummary;

/// Progress callback for reporting import/export status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each row or item is handled.
    fn item(&self, title: &str, current: usize, total: usize);
    /// Called when the operation completes.
    fn done(&self);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn item(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self) {}
}

/// Configuration for an `update_from_csv` run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// CSV file to import.
    pub csv_file: PathBuf,
    /// Encodings tried in order.
    pub encodings: Vec<TextEncoding>,
    /// Which tag categories to update.
    pub flags: UpdateFlags,
}

/// Import labels/genres from a CSV file into the catalog.
///
/// 1. Read and decode the file (fatal on missing file, undecodable bytes,
///    or a missing `Title` column)
/// 2. Reconcile each row in file order
/// 3. Return the tallied summary
///
/// Rows run strictly one after another, so a later row that targets the
/// same entry sees the tags added by an earlier one.
#[instrument(skip_all, fields(csv = %options.csv_file.display()))]
pub async fn update_from_csv<C: Catalog>(
    catalog: &C,
    options: &SyncOptions,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary> {
    if !options.flags.any() {
        return Err(PlexTagsError::config(
            "At least one of --update-labels or --update-genres must be specified.",
        ));
    }

    info!(
        "updating {} from CSV: {}",
        options.flags.describe(),
        options.csv_file.display()
    );

    progress.phase("Reading CSV");
    let import = reader::read_csv(&options.csv_file, &options.encodings, options.flags)?;
    info!(encoding = %import.encoding, rows = import.rows.len(), "CSV loaded");

    progress.phase("Updating shows");
    let mut summary = RunSummary::new(options.flags);
    let total = import.rows.len();

    for (i, row) in import.rows.iter().enumerate() {
        progress.item(&row.title, i + 1, total);
        let outcome = reconcile_row(catalog, row, options.flags, &mut summary).await?;
        debug!(title = %row.title, ?outcome, "row done");
    }

    progress.done();

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        not_found = summary.not_found.len(),
        labels_added = summary.labels_added,
        genres_added = summary.genres_added,
        "import complete"
    );

    Ok(summary)
}

//! Export every show's genres and labels to a UTF-8 CSV file.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use plextags_shared::{Catalog, CatalogEntry, LibType, PlexTagsError, Result, Tag};

use crate::sync::ProgressReporter;

/// Header written to export files.
pub const EXPORT_HEADER: [&str; 4] = ["Title", "Year", "Genres", "Labels"];

/// Result of an export run.
#[derive(Debug)]
pub struct ExportResult {
    /// File that was written.
    pub path: PathBuf,
    /// Number of shows written.
    pub count: usize,
}

/// One CSV record for an entry. Tags keep the catalog's own order.
fn export_record(entry: &CatalogEntry) -> [String; 4] {
    [
        entry.title.clone(),
        entry.year.map(|y| y.to_string()).unwrap_or_default(),
        Tag::join(&entry.genres),
        Tag::join(&entry.labels),
    ]
}

/// Write all shows in the catalog to `path`, overwriting it.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn export_to_csv<C: Catalog>(
    catalog: &C,
    path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<ExportResult> {
    info!("exporting TV shows to {}", path.display());

    progress.phase("Listing shows");
    let shows = catalog.list_all(LibType::Show).await?;

    progress.phase("Writing CSV");
    let csv_err = |e: csv::Error| PlexTagsError::io(path, e.into());
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(EXPORT_HEADER).map_err(csv_err)?;

    let total = shows.len();
    for (i, show) in shows.iter().enumerate() {
        progress.item(&show.title, i + 1, total);
        writer.write_record(export_record(show)).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| PlexTagsError::io(path, e))?;

    progress.done();
    info!("exported {total} TV shows to {}", path.display());

    Ok(ExportResult {
        path: path.to_path_buf(),
        count: total,
    })
}
